//! Hosted provider: the Gemini `generateContent` REST API.
//!
//! The API key travels in the query string, so request URLs must never be
//! logged.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::providers::{
    http_client, transport_error, truncate_body, CompletionProvider, ProviderError, ProviderId,
    SAMPLING_TEMPERATURE,
};

pub struct GeminiProvider {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiProvider {
    pub fn new(base_url: String, api_key: String, model: String, timeout_secs: u64) -> Self {
        Self {
            client: http_client(timeout_secs),
            base_url,
            api_key,
            model,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<Part>>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Joins the text of every candidate part; Gemini may split one reply
    /// across several parts.
    fn text(self) -> String {
        self.candidates
            .unwrap_or_default()
            .into_iter()
            .flat_map(|candidate| {
                candidate
                    .content
                    .and_then(|content| content.parts)
                    .unwrap_or_default()
            })
            .filter_map(|part| part.text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Hosted
    }

    async fn complete(&self, system: &str, user: &str) -> Result<String, ProviderError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url.trim_end_matches('/'),
            self.model,
            self.api_key
        );

        let request_body = json!({
            "systemInstruction": {
                "parts": [{"text": system}]
            },
            "contents": [
                {
                    "role": "user",
                    "parts": [{"text": user}]
                }
            ],
            "generationConfig": {
                "temperature": SAMPLING_TEMPERATURE
            }
        });

        let response = self
            .client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Http {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let completion: GenerateContentResponse =
            response.json().await.map_err(|e| ProviderError::Http {
                status: status.as_u16(),
                body: format!("undecodable generateContent body: {e}"),
            })?;

        let content = completion.text();

        if content.trim().is_empty() {
            return Err(ProviderError::EmptyResponse);
        }

        debug!(model = %self.model, "gemini raw response: {content}");

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_content_response_decodes() {
        let body = r#"{
            "candidates": [
                {
                    "content": {
                        "parts": [{"text": "{\"skills\":"}, {"text": " []}"}],
                        "role": "model"
                    },
                    "finishReason": "STOP"
                }
            ]
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.text(), "{\"skills\":\n []}");
    }

    #[test]
    fn test_generate_content_response_without_candidates_is_empty() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.text().is_empty());
    }

    #[test]
    fn test_generate_content_response_tolerates_partless_candidate() {
        let body = r#"{"candidates": [{"finishReason": "SAFETY"}]}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.text().is_empty());
    }
}
