//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{ContentPart, DataUrl, DomainError, GroundedText};

/// Generative model gateway. One shared, stateless handle injected into every use case.
#[async_trait::async_trait]
pub trait AiPort: Send + Sync {
    /// Text generation with web-search grounding enabled.
    ///
    /// Returns the reply text (if any) and the citation metadata the search tool attached.
    async fn generate_grounded(&self, model: &str, prompt: &str)
    -> Result<GroundedText, DomainError>;

    /// Multimodal generation from an inline image plus an instruction.
    ///
    /// Returns the reply parts in the order the model produced them; empty when the
    /// model returned no content.
    async fn generate_multimodal(
        &self,
        model: &str,
        image: &DataUrl,
        instruction: &str,
    ) -> Result<Vec<ContentPart>, DomainError>;
}
