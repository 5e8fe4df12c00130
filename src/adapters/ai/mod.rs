//! AI adapter module. Implements AiPort for the generative model.
//!
//! Provides the Gemini REST adapter, a mock adapter for running offline, and the
//! prompt/reply helpers shared by the use cases.

pub mod gemini_adapter;
pub mod json_utils;
pub mod mock_adapter;
pub mod prompt;

pub use gemini_adapter::GeminiAdapter;
pub use json_utils::{parse_events, sanitize_json};
pub use mock_adapter::MockAiAdapter;
pub use prompt::timeline_prompt;
