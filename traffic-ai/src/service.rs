//! The AI service seen from the adapter: two capabilities, nothing else.
//!
//! `GeminiService` is the live HTTP implementation. Tests swap in fakes.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::fmt;

use crate::config::AiConfig;
use crate::wire::{GenerateContentRequest, GenerateContentResponse, GroundingChunk};
use crate::AiError;

const API_KEY_HEADER: &str = "x-goog-api-key";

const REDACTED: &str = "<redacted>";

// keep error bodies short in logs and explanations
const MAX_ERROR_BODY: usize = 512;

#[async_trait]
pub trait TrafficService: Send + Sync {
    /// Raw completion text for `prompt`, constrained to `schema`.
    async fn structured_assessment(&self, prompt: &str, schema: &Value) -> Result<String, AiError>;

    /// Grounding chunks for `prompt`, in service order. Missing metadata is `Ok(vec![])`.
    async fn grounding_chunks(&self, prompt: &str) -> Result<Vec<GroundingChunk>, AiError>;
}

#[async_trait]
impl<S: TrafficService + ?Sized> TrafficService for std::sync::Arc<S> {
    async fn structured_assessment(&self, prompt: &str, schema: &Value) -> Result<String, AiError> {
        (**self).structured_assessment(prompt, schema).await
    }

    async fn grounding_chunks(&self, prompt: &str) -> Result<Vec<GroundingChunk>, AiError> {
        (**self).grounding_chunks(prompt).await
    }
}

/// `generateContent` over HTTPS. No retries, no timeout.
#[derive(Clone)]
pub struct GeminiService {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl fmt::Debug for GeminiService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiService")
            .field("url", &self.url)
            .field("api_key", &self.api_key.as_ref().map(|_| REDACTED))
            .finish()
    }
}

impl GeminiService {
    pub fn new(config: &AiConfig) -> Self {
        Self {
            client: Client::new(),
            url: config.generate_url(),
            api_key: config.api_key.clone(),
        }
    }

    async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, AiError> {
        let api_key = self.api_key.as_deref().ok_or(AiError::MissingCredential)?;

        tracing::debug!(url = %self.url, "sending generateContent request");

        let response = self
            .client
            .post(&self.url)
            .header(API_KEY_HEADER, api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let mut body = match response.text().await {
                Ok(body) => body,
                Err(err) => {
                    tracing::warn!(error = %err, "could not read error response body");
                    String::new()
                }
            };
            truncate_on_char_boundary(&mut body, MAX_ERROR_BODY);
            tracing::warn!(status = status.as_u16(), "generateContent returned an error status");
            return Err(AiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed = decode_response(&body)?;
        tracing::debug!(
            candidates = parsed.candidates.len(),
            "generateContent response received"
        );
        Ok(parsed)
    }
}

/// Decode a 2xx body. A malformed envelope is not a transport failure.
fn decode_response(body: &str) -> Result<GenerateContentResponse, AiError> {
    serde_json::from_str(body).map_err(AiError::InvalidEnvelope)
}

#[async_trait]
impl TrafficService for GeminiService {
    async fn structured_assessment(&self, prompt: &str, schema: &Value) -> Result<String, AiError> {
        let request = GenerateContentRequest::structured(prompt, schema.clone());
        self.generate(&request)
            .await?
            .text()
            .ok_or(AiError::EmptyResponse)
    }

    async fn grounding_chunks(&self, prompt: &str) -> Result<Vec<GroundingChunk>, AiError> {
        let request = GenerateContentRequest::maps_grounded(prompt);
        Ok(self.generate(&request).await?.into_grounding_chunks())
    }
}

fn truncate_on_char_boundary(s: &mut String, max: usize) {
    if s.len() <= max {
        return;
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    s.truncate(cut);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_key_fails_before_network() {
        let service = GeminiService::new(&AiConfig::default());
        let err = service.grounding_chunks("anything").await.unwrap_err();
        assert!(matches!(err, AiError::MissingCredential));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let mut config = AiConfig::with_api_key("test-key");
        // port 9 (discard) on loopback: nothing listens there in CI
        config.base_url = "http://127.0.0.1:9/v1beta".into();
        let service = GeminiService::new(&config);

        let err = service
            .structured_assessment("prompt", &serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, AiError::Transport(_)));
    }

    #[test]
    fn test_debug_hides_api_key() {
        let service = GeminiService::new(&AiConfig::with_api_key("super-secret"));
        let printed = format!("{service:?}");
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_malformed_envelope_is_not_transport() {
        let err = decode_response("<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, AiError::InvalidEnvelope(_)));

        let empty = decode_response("{}").unwrap();
        assert!(empty.candidates.is_empty());
    }

    #[test]
    fn test_truncate_respects_utf8() {
        let mut s = "ééééé".to_string(); // 10 bytes
        truncate_on_char_boundary(&mut s, 3);
        assert_eq!(s, "é");
    }
}
