use reqwest::Client;
use std::time::{Duration, Instant};

use super::types::{ClaudeMessage, ClaudeRequest, ClaudeResponse};
use crate::provider::ModelProvider;
use crate::types::{DispatchRequest, ProviderResult};
use crate::Error;

pub const PROVIDER_ID: &str = "claude";
const MODEL: &str = "claude-3-5-sonnet-20241022";
const MAX_TOKENS: u32 = 2000;
const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Anthropic Claude provider (messages API, header-based auth).
pub struct ClaudeProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl ClaudeProvider {
    /// Create a new Claude provider. A missing API key is allowed: invoking
    /// the adapter then degrades to a soft failure instead of a hard fault.
    pub fn new(api_key: Option<String>) -> Result<Self, Error> {
        let client = Client::builder().timeout(Duration::from_secs(60)).build()?;

        Ok(Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Create a new Claude provider with custom base URL (for testing).
    pub fn new_with_base_url(api_key: Option<String>, base_url: String) -> Result<Self, Error> {
        let mut provider = Self::new(api_key)?;
        provider.base_url = base_url;
        Ok(provider)
    }

    /// Convert a dispatch request to Anthropic wire format: top-level system
    /// string plus a single user message.
    fn convert_request(&self, request: &DispatchRequest) -> ClaudeRequest {
        ClaudeRequest {
            model: MODEL.to_string(),
            max_tokens: MAX_TOKENS,
            system: request.system_instruction.clone(),
            messages: vec![ClaudeMessage {
                role: "user".to_string(),
                content: request.prompt.clone(),
            }],
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/messages", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait::async_trait]
impl ModelProvider for ClaudeProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn invoke(&self, request: &DispatchRequest) -> ProviderResult {
        let start = Instant::now();

        let Some(api_key) = &self.api_key else {
            return ProviderResult::failure(
                PROVIDER_ID,
                "ANTHROPIC_API_KEY credential missing, call skipped",
                0,
            );
        };

        let payload = self.convert_request(request);

        let response = match self
            .client
            .post(self.endpoint())
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                return ProviderResult::failure(
                    PROVIDER_ID,
                    format!("Claude request failed: {e}"),
                    start.elapsed().as_millis() as u64,
                )
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return ProviderResult::failure(
                    PROVIDER_ID,
                    format!("Claude response read failed: {e}"),
                    start.elapsed().as_millis() as u64,
                )
            }
        };

        if !status.is_success() {
            return ProviderResult::failure(
                PROVIDER_ID,
                format!("Claude error: HTTP {}: {body}", status.as_u16()),
                start.elapsed().as_millis() as u64,
            );
        }

        match serde_json::from_str::<ClaudeResponse>(&body)
            .ok()
            .and_then(ClaudeResponse::reply_text)
        {
            Some(text) => {
                ProviderResult::success(PROVIDER_ID, text, start.elapsed().as_millis() as u64)
            }
            None => ProviderResult::failure(
                PROVIDER_ID,
                format!("Claude error: unexpected response shape: {body}"),
                start.elapsed().as_millis() as u64,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_provider_creation() {
        let provider = ClaudeProvider::new(Some("test-key".to_string()));
        assert!(provider.is_ok());
    }

    #[test]
    fn test_request_conversion_matches_wire_shape() {
        let provider = ClaudeProvider::new(Some("test-key".to_string())).unwrap();
        let request = DispatchRequest::new("Write a hello world in ABAP", "You are an expert.");

        let payload = provider.convert_request(&request);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "model": "claude-3-5-sonnet-20241022",
                "max_tokens": 2000,
                "system": "You are an expert.",
                "messages": [ { "role": "user", "content": "Write a hello world in ABAP" } ]
            })
        );
    }

    #[tokio::test]
    async fn test_missing_credential_is_soft_failure() {
        let provider = ClaudeProvider::new(None).unwrap();
        let request = DispatchRequest::new("hi", "system");

        let result = provider.invoke(&request).await;
        assert!(result.failed);
        assert_eq!(result.latency_ms, 0);
        assert!(result.content.contains("credential"));
        assert!(result.content.contains("ANTHROPIC_API_KEY"));
    }
}
