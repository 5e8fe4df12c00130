//! Mock AI adapter for running without an API key.
//!
//! Returns hardcoded replies shaped like real model output (including the Markdown
//! fences models add despite instructions) so the whole pipeline is exercised.

use crate::domain::{
    ContentPart, DataUrl, DomainError, GroundedText, GroundingChunk, InlineImage, WebSource,
};
use crate::ports::AiPort;
use std::time::Duration;
use tracing::info;

const MOCK_TIMELINE: &str = r#"```json
[
  {
    "year": 1990,
    "category": "Education",
    "originalBelief": "The tongue has separate zones for sweet, sour, salty and bitter.",
    "modernReality": "Every taste region detects all basic tastes.",
    "status": "Debunked",
    "context": "[MOCK] The tongue map came from a mistranslated 1901 German paper.",
    "sourceUrl": "https://en.wikipedia.org/wiki/Tongue_map",
    "sourceTitle": "Tongue map - Wikipedia"
  },
  {
    "year": 1995,
    "category": "Science",
    "originalBelief": "Pluto is the ninth planet of the Solar System.",
    "modernReality": "Pluto is classified as a dwarf planet.",
    "status": "Changed",
    "context": "[MOCK] The IAU adopted a formal planet definition in 2006."
  },
  {
    "year": 2000,
    "category": "Urban Legends",
    "originalBelief": "Swallowed gum stays in your stomach for seven years.",
    "modernReality": "Gum passes through the digestive tract within days.",
    "status": "Debunked",
    "context": "[MOCK] The gum base is indigestible but still moves along normally."
  },
  {
    "year": 2010,
    "category": "Records",
    "originalBelief": "The tallest building in the world is under 500 m.",
    "modernReality": "Burj Khalifa stands at 828 m.",
    "status": "Evolved",
    "context": "[MOCK] Supertall construction accelerated after 2000."
  }
]
```"#;

/// Mock AI adapter for testing.
///
/// Returns predetermined responses without making API calls.
/// Simulates network latency with configurable delay.
pub struct MockAiAdapter {
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
}

impl MockAiAdapter {
    /// Create a new mock adapter with default delay (300ms).
    pub fn new() -> Self {
        Self { delay_ms: 300 }
    }

    /// Create a mock adapter with custom delay.
    pub fn with_delay(delay_ms: u64) -> Self {
        Self { delay_ms }
    }

    fn source(uri: &str, title: &str) -> GroundingChunk {
        GroundingChunk {
            web: Some(WebSource {
                uri: uri.to_string(),
                title: title.to_string(),
            }),
        }
    }
}

impl Default for MockAiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AiPort for MockAiAdapter {
    async fn generate_grounded(
        &self,
        model: &str,
        prompt: &str,
    ) -> Result<GroundedText, DomainError> {
        info!(model, prompt_len = prompt.len(), "[MOCK] Simulating grounded generation");

        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

        Ok(GroundedText {
            text: Some(MOCK_TIMELINE.to_string()),
            grounding_chunks: Some(vec![
                Self::source("https://en.wikipedia.org/wiki/Tongue_map", "wikipedia.org"),
                Self::source("https://www.iau.org/public/themes/pluto/", "iau.org"),
                Self::source("https://en.wikipedia.org/wiki/Tongue_map", "wikipedia.org"),
            ]),
        })
    }

    async fn generate_multimodal(
        &self,
        model: &str,
        image: &DataUrl,
        instruction: &str,
    ) -> Result<Vec<ContentPart>, DomainError> {
        info!(
            model,
            mime = %image.mime_type,
            instruction_len = instruction.len(),
            "[MOCK] Simulating image edit (echoes the input image)"
        );

        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

        Ok(vec![
            ContentPart::Text(format!("[MOCK] Applied: {}", instruction)),
            ContentPart::InlineData(InlineImage {
                mime_type: Some(image.mime_type.clone()),
                data: image.data.clone(),
            }),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::parse_events;

    #[tokio::test]
    async fn test_mock_timeline_is_parseable() {
        let adapter = MockAiAdapter::with_delay(0);
        let reply = adapter.generate_grounded("mock", "prompt").await.unwrap();

        let events = parse_events(reply.text.as_deref().unwrap()).into_events();
        assert_eq!(events.len(), 4);
        assert!(events.iter().any(|e| e.is_mystical()));
        assert_eq!(reply.grounding_chunks.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_mock_image_echo() {
        let adapter = MockAiAdapter::with_delay(0);
        let image = DataUrl::new("image/webp", "UklGRg==");
        let parts = adapter
            .generate_multimodal("mock", &image, "add a hat")
            .await
            .unwrap();
        assert_eq!(parts.len(), 2);
        assert!(matches!(&parts[1], ContentPart::InlineData(i) if i.data == "UklGRg=="));
    }
}
