use reqwest::Client;
use std::time::{Duration, Instant};

use super::types::{GeminiContent, GeminiPart, GeminiRequest, GeminiResponse, GeminiSystemInstruction};
use crate::provider::ModelProvider;
use crate::types::{DispatchRequest, ProviderResult};
use crate::Error;

pub const PROVIDER_ID: &str = "gemini";
const MODEL: &str = "gemini-1.5-pro";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Google Gemini provider (generative language REST API, key-in-query auth).
pub struct GeminiProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider. A missing API key is allowed: invoking
    /// the adapter then degrades to a soft failure instead of a hard fault.
    pub fn new(api_key: Option<String>) -> Result<Self, Error> {
        let client = Client::builder().timeout(Duration::from_secs(60)).build()?;

        Ok(Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Create a new Gemini provider with custom base URL (for testing).
    pub fn new_with_base_url(api_key: Option<String>, base_url: String) -> Result<Self, Error> {
        let mut provider = Self::new(api_key)?;
        provider.base_url = base_url;
        Ok(provider)
    }

    /// Convert a dispatch request to Gemini wire format. The system
    /// instruction rides in a dedicated field; the prompt becomes a single
    /// text part inside `contents`.
    fn convert_request(&self, request: &DispatchRequest) -> GeminiRequest {
        GeminiRequest {
            system_instruction: GeminiSystemInstruction {
                parts: GeminiPart {
                    text: request.system_instruction.clone(),
                },
            },
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: request.prompt.clone(),
                }],
            }],
        }
    }

    fn endpoint(&self, api_key: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url.trim_end_matches('/'),
            MODEL,
            api_key
        )
    }
}

#[async_trait::async_trait]
impl ModelProvider for GeminiProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn invoke(&self, request: &DispatchRequest) -> ProviderResult {
        let start = Instant::now();

        let Some(api_key) = &self.api_key else {
            return ProviderResult::failure(
                PROVIDER_ID,
                "GEMINI_API_KEY credential missing, call skipped",
                0,
            );
        };

        let payload = self.convert_request(request);

        let response = match self
            .client
            .post(self.endpoint(api_key))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                return ProviderResult::failure(
                    PROVIDER_ID,
                    format!("Gemini request failed: {e}"),
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
                    format!("Gemini response read failed: {e}"),
                    start.elapsed().as_millis() as u64,
                )
            }
        };

        if !status.is_success() {
            return ProviderResult::failure(
                PROVIDER_ID,
                format!("Gemini error: HTTP {}: {body}", status.as_u16()),
                start.elapsed().as_millis() as u64,
            );
        }

        match serde_json::from_str::<GeminiResponse>(&body)
            .ok()
            .and_then(GeminiResponse::reply_text)
        {
            Some(text) => {
                ProviderResult::success(PROVIDER_ID, text, start.elapsed().as_millis() as u64)
            }
            None => ProviderResult::failure(
                PROVIDER_ID,
                format!("Gemini error: unexpected response shape: {body}"),
                start.elapsed().as_millis() as u64,
            ),
        }
    }
}
