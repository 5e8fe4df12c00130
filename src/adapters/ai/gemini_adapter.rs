//! Gemini REST adapter.
//!
//! Talks to `POST {api_url}/models/{model}:generateContent`. Implements `AiPort`
//! for both the search-grounded text call and the multimodal image call.

use crate::domain::{ContentPart, DataUrl, DomainError, GroundedText, GroundingChunk, InlineImage};
use crate::ports::AiPort;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

/// Gemini `generateContent` client.
///
/// Built once at startup and shared by every use case through `Arc<dyn AiPort>`.
pub struct GeminiAdapter {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl GeminiAdapter {
    /// Create a new Gemini adapter.
    ///
    /// # Arguments
    /// * `api_url` - API base (e.g., "https://generativelanguage.googleapis.com/v1beta")
    /// * `api_key` - Gemini API key, sent as `x-goog-api-key`
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_url.trim_end_matches('/'),
            model
        )
    }

    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, DomainError> {
        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| DomainError::Ai(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, model, "Gemini API returned error");
            return Err(DomainError::Ai(format!(
                "API error {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| DomainError::Ai(format!("Failed to parse API response: {}", e)))
    }
}

/// generateContent request body.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
}

#[derive(Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<Blob>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Blob {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mime_type: Option<String>,
    #[serde(default)]
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Serialize)]
struct GoogleSearch {}

/// generateContent response body (only the fields we read).
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Option<Vec<GroundingChunk>>,
}

impl GenerateContentRequest {
    fn grounded(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                    inline_data: None,
                }],
            }],
            tools: vec![Tool {
                google_search: GoogleSearch {},
            }],
        }
    }

    /// Instruction first, then the image.
    fn multimodal(image: &DataUrl, instruction: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![
                    Part {
                        text: Some(instruction.to_string()),
                        inline_data: None,
                    },
                    Part {
                        text: None,
                        inline_data: Some(Blob {
                            mime_type: Some(image.mime_type.clone()),
                            data: image.data.clone(),
                        }),
                    },
                ],
            }],
            tools: Vec::new(),
        }
    }
}

impl GenerateContentResponse {
    fn first_parts(&self) -> &[Part] {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or_default()
    }

    /// Concatenated text parts of the first candidate; None when there are none.
    fn text(&self) -> Option<String> {
        let texts: Vec<&str> = self
            .first_parts()
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!texts.is_empty()).then(|| texts.concat())
    }

    fn into_grounded_text(self) -> GroundedText {
        let text = self.text();
        let grounding_chunks = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.grounding_metadata)
            .and_then(|m| m.grounding_chunks);
        GroundedText {
            text,
            grounding_chunks,
        }
    }

    fn into_content_parts(self) -> Vec<ContentPart> {
        let parts = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts)
            .unwrap_or_default();
        parts
            .into_iter()
            .flat_map(|p| {
                let mut out = Vec::with_capacity(2);
                if let Some(text) = p.text {
                    out.push(ContentPart::Text(text));
                }
                if let Some(blob) = p.inline_data {
                    out.push(ContentPart::InlineData(InlineImage {
                        mime_type: blob.mime_type.filter(|m| !m.is_empty()),
                        data: blob.data,
                    }));
                }
                out
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl AiPort for GeminiAdapter {
    async fn generate_grounded(
        &self,
        model: &str,
        prompt: &str,
    ) -> Result<GroundedText, DomainError> {
        info!(model, prompt_len = prompt.len(), "sending grounded generation request");

        let request = GenerateContentRequest::grounded(prompt);
        let response = self
            .generate_content(model, &request)
            .await
            .inspect_err(|e| error!(error = %e, "Gemini timeline request failed"))?;

        let grounded = response.into_grounded_text();
        debug!(
            text_len = grounded.text.as_ref().map(|t| t.len()).unwrap_or(0),
            chunks = grounded.grounding_chunks.as_ref().map(|c| c.len()).unwrap_or(0),
            "received grounded reply"
        );
        Ok(grounded)
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
            payload_len = image.data.len(),
            "sending image edit request"
        );

        let request = GenerateContentRequest::multimodal(image, instruction);
        let response = self
            .generate_content(model, &request)
            .await
            .inspect_err(|e| error!(error = %e, "Gemini image edit request failed"))?;

        let parts = response.into_content_parts();
        debug!(parts = parts.len(), "received multimodal reply");
        Ok(parts)
    }
}
