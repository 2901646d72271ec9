use std::env;
use std::sync::Arc;

use crate::providers::{ClaudeProvider, GeminiProvider, OpenAIProvider};
use crate::{Error, ModelProvider};

/// One optional credential per supported provider.
///
/// Credentials are injected at registry construction rather than read from
/// the environment inside each adapter, so tests can exercise any credential
/// combination without mutating process state. An absent credential does not
/// fail construction: the corresponding adapter degrades to soft failures.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub gemini_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub openai_api_key: Option<String>,
}

impl Credentials {
    /// Read credentials from the conventional environment variables.
    pub fn from_env() -> Self {
        Self {
            gemini_api_key: env::var("GEMINI_API_KEY").ok(),
            anthropic_api_key: env::var("ANTHROPIC_API_KEY").ok(),
            openai_api_key: env::var("OPENAI_API_KEY").ok(),
        }
    }

    pub fn with_gemini(mut self, api_key: impl Into<String>) -> Self {
        self.gemini_api_key = Some(api_key.into());
        self
    }

    pub fn with_anthropic(mut self, api_key: impl Into<String>) -> Self {
        self.anthropic_api_key = Some(api_key.into());
        self
    }

    pub fn with_openai(mut self, api_key: impl Into<String>) -> Self {
        self.openai_api_key = Some(api_key.into());
        self
    }
}

/// The closed, ordered set of configured provider adapters.
///
/// Declaration order is the order fan-out results are returned in, fixed at
/// construction. Adding a provider means registering another adapter here,
/// not extending a branch somewhere else.
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn ModelProvider>>,
}

impl ProviderRegistry {
    /// Build the standard registry: gemini, claude, gpt4o, in that order.
    pub fn new(credentials: Credentials) -> Result<Self, Error> {
        Ok(Self::from_adapters(vec![
            Arc::new(GeminiProvider::new(credentials.gemini_api_key)?),
            Arc::new(ClaudeProvider::new(credentials.anthropic_api_key)?),
            Arc::new(OpenAIProvider::new(credentials.openai_api_key)?),
        ]))
    }

    /// Build a registry from an explicit adapter list, preserving order.
    /// Used by tests and by callers wiring non-default endpoints.
    pub fn from_adapters(providers: Vec<Arc<dyn ModelProvider>>) -> Self {
        Self { providers }
    }

    /// All registered adapters in declared order.
    pub fn providers(&self) -> &[Arc<dyn ModelProvider>] {
        &self.providers
    }

    /// Look up one adapter by identifier.
    pub fn get(&self, provider_id: &str) -> Option<&Arc<dyn ModelProvider>> {
        self.providers
            .iter()
            .find(|provider| provider.id() == provider_id)
    }

    /// Number of registered adapters.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
