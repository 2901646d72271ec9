use reqwest::Client;
use std::time::{Duration, Instant};

use super::types::{ChatCompletionsMessage, ChatCompletionsRequest, ChatCompletionsResponse};
use crate::provider::ModelProvider;
use crate::types::{DispatchRequest, ProviderResult};
use crate::Error;

pub const PROVIDER_ID: &str = "gpt4o";
const MODEL: &str = "gpt-4o";
const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// OpenAI provider (chat-completions API, bearer auth).
pub struct OpenAIProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider. A missing API key is allowed: invoking
    /// the adapter then degrades to a soft failure instead of a hard fault.
    pub fn new(api_key: Option<String>) -> Result<Self, Error> {
        let client = Client::builder().timeout(Duration::from_secs(60)).build()?;

        Ok(Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Create a new OpenAI provider with custom base URL (for testing).
    pub fn new_with_base_url(api_key: Option<String>, base_url: String) -> Result<Self, Error> {
        let mut provider = Self::new(api_key)?;
        provider.base_url = base_url;
        Ok(provider)
    }

    /// Convert a dispatch request to chat-completions wire format: a
    /// system-role message followed by a user-role message.
    fn convert_request(&self, request: &DispatchRequest) -> ChatCompletionsRequest {
        ChatCompletionsRequest {
            model: MODEL.to_string(),
            messages: vec![
                ChatCompletionsMessage {
                    role: "system".to_string(),
                    content: request.system_instruction.clone(),
                },
                ChatCompletionsMessage {
                    role: "user".to_string(),
                    content: request.prompt.clone(),
                },
            ],
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait::async_trait]
impl ModelProvider for OpenAIProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn invoke(&self, request: &DispatchRequest) -> ProviderResult {
        let start = Instant::now();

        let Some(api_key) = &self.api_key else {
            return ProviderResult::failure(
                PROVIDER_ID,
                "OPENAI_API_KEY credential missing, call skipped",
                0,
            );
        };

        let payload = self.convert_request(request);

        let response = match self
            .client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                return ProviderResult::failure(
                    PROVIDER_ID,
                    format!("OpenAI request failed: {e}"),
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
                    format!("OpenAI response read failed: {e}"),
                    start.elapsed().as_millis() as u64,
                )
            }
        };

        if !status.is_success() {
            return ProviderResult::failure(
                PROVIDER_ID,
                format!("OpenAI error: HTTP {}: {body}", status.as_u16()),
                start.elapsed().as_millis() as u64,
            );
        }

        match serde_json::from_str::<ChatCompletionsResponse>(&body)
            .ok()
            .and_then(ChatCompletionsResponse::reply_text)
        {
            Some(text) => {
                ProviderResult::success(PROVIDER_ID, text, start.elapsed().as_millis() as u64)
            }
            None => ProviderResult::failure(
                PROVIDER_ID,
                format!("OpenAI error: unexpected response shape: {body}"),
                start.elapsed().as_millis() as u64,
            ),
        }
    }
}
