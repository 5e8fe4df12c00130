//! Image edit service. Sends an image plus an instruction to the model and pulls
//! the edited image back out of the reply.

use crate::domain::{ContentPart, DataUrl, DomainError};
use crate::ports::AiPort;
use std::sync::Arc;
use tracing::{error, info, warn};

/// MIME type assumed when the model omits one on the returned image.
pub const DEFAULT_OUTPUT_MIME: &str = "image/png";

pub struct ImageEditService {
    ai: Arc<dyn AiPort>,
    model: String,
}

impl ImageEditService {
    pub fn new(ai: Arc<dyn AiPort>, model: impl Into<String>) -> Self {
        Self {
            ai,
            model: model.into(),
        }
    }

    /// Edit `image_data_url` according to `instruction`; returns the result as a data URL.
    ///
    /// A malformed data URL fails before any network call. The caller is
    /// responsible for rejecting an empty instruction.
    pub async fn edit(
        &self,
        image_data_url: &str,
        instruction: &str,
    ) -> Result<String, DomainError> {
        let image = DataUrl::parse(image_data_url)?;
        info!(
            mime = %image.mime_type,
            instruction_len = instruction.len(),
            "editing image"
        );

        let parts = self
            .ai
            .generate_multimodal(&self.model, &image, instruction)
            .await
            .inspect_err(|e| error!(error = %e, "image edit failed"))?;

        extract_image(&parts)
    }
}

/// First inline image in the reply, re-encoded as a data URL.
///
/// Without an image, the first text part is the model's explanation (usually a refusal).
pub fn extract_image(parts: &[ContentPart]) -> Result<String, DomainError> {
    let image = parts.iter().find_map(|p| match p {
        ContentPart::InlineData(img) if !img.data.is_empty() => Some(img),
        _ => None,
    });
    if let Some(img) = image {
        let mime = img.mime_type.as_deref().unwrap_or(DEFAULT_OUTPUT_MIME);
        info!(mime, payload_len = img.data.len(), "image edit complete");
        return Ok(DataUrl::new(mime, img.data.as_str()).to_string());
    }

    let text = parts.iter().find_map(|p| match p {
        ContentPart::Text(t) if !t.is_empty() => Some(t),
        _ => None,
    });
    match text {
        Some(t) => {
            warn!(reply = %t, "model returned text instead of an image");
            Err(DomainError::ModelRefusal(t.clone()))
        }
        None => {
            warn!(parts = parts.len(), "model returned no image");
            Err(DomainError::NoImage)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GroundedText, InlineImage};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ScriptedAi {
        parts: Vec<ContentPart>,
        calls: AtomicUsize,
    }

    impl ScriptedAi {
        fn new(parts: Vec<ContentPart>) -> Arc<Self> {
            Arc::new(Self {
                parts,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait::async_trait]
    impl AiPort for ScriptedAi {
        async fn generate_grounded(
            &self,
            _model: &str,
            _prompt: &str,
        ) -> Result<GroundedText, DomainError> {
            unreachable!("image editor never requests timelines")
        }

        async fn generate_multimodal(
            &self,
            _model: &str,
            _image: &DataUrl,
            _instruction: &str,
        ) -> Result<Vec<ContentPart>, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.parts.clone())
        }
    }

    const INPUT: &str = "data:image/png;base64,iVBORw0KGgo=";

    fn inline(mime: Option<&str>, data: &str) -> ContentPart {
        ContentPart::InlineData(InlineImage {
            mime_type: mime.map(str::to_string),
            data: data.to_string(),
        })
    }

    #[tokio::test]
    async fn test_malformed_data_url_fails_fast() {
        let ai = ScriptedAi::new(vec![inline(Some("image/png"), "AAAA")]);
        let service = ImageEditService::new(ai.clone(), "gemini-2.5-flash-image");

        for input in ["not a data url", "data:image/png,AAAA", "data:;base64,AAAA"] {
            let err = service.edit(input, "add a hat").await.unwrap_err();
            assert!(matches!(err, DomainError::InvalidDataUrl(_)), "{input}");
        }
        assert_eq!(ai.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_returns_inline_image_as_data_url() {
        let ai = ScriptedAi::new(vec![inline(Some("image/jpeg"), "ABC123")]);
        let service = ImageEditService::new(ai.clone(), "gemini-2.5-flash-image");

        let out = service.edit(INPUT, "add a hat").await.unwrap();
        assert_eq!(out, "data:image/jpeg;base64,ABC123");
        assert_eq!(ai.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_mime_defaults_to_png() {
        let ai = ScriptedAi::new(vec![inline(None, "ABC123")]);
        let service = ImageEditService::new(ai, "gemini-2.5-flash-image");

        let out = service.edit(INPUT, "add a hat").await.unwrap();
        assert_eq!(out, "data:image/png;base64,ABC123");
    }

    #[tokio::test]
    async fn test_text_only_reply_is_refusal() {
        let ai = ScriptedAi::new(vec![ContentPart::Text("policy refusal".to_string())]);
        let service = ImageEditService::new(ai, "gemini-2.5-flash-image");

        let err = service.edit(INPUT, "add a hat").await.unwrap_err();
        assert_eq!(err, DomainError::ModelRefusal("policy refusal".to_string()));
        assert_eq!(err.to_string(), "policy refusal");
    }

    #[tokio::test]
    async fn test_empty_reply_is_no_image() {
        let ai = ScriptedAi::new(Vec::new());
        let service = ImageEditService::new(ai, "gemini-2.5-flash-image");

        let err = service.edit(INPUT, "add a hat").await.unwrap_err();
        assert_eq!(err, DomainError::NoImage);
        assert_eq!(err.to_string(), "No image data found in response.");
    }

    #[test]
    fn test_image_wins_over_text_and_first_image_wins() {
        let parts = vec![
            ContentPart::Text("Here is your edit".to_string()),
            inline(Some("image/png"), ""),
            inline(Some("image/webp"), "FIRST"),
            inline(Some("image/png"), "SECOND"),
        ];
        assert_eq!(
            extract_image(&parts).unwrap(),
            "data:image/webp;base64,FIRST"
        );
    }
}
