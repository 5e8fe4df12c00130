//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// User input rejected before any network call (birth year, empty prompt, file type).
    #[error("{0}")]
    Validation(String),

    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    /// Transport or API failure talking to the generative model.
    #[error("AI request failed: {0}")]
    Ai(String),

    /// The model answered with text instead of an image. Carries the model's own words.
    #[error("{0}")]
    ModelRefusal(String),

    #[error("No image data found in response.")]
    NoImage,

    #[error("Image store error: {0}")]
    Store(String),

    #[error("UI error: {0}")]
    Ui(String),
}
