use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, error, warn};

use crate::registry::ProviderRegistry;
use crate::types::{ChatTurn, DispatchRequest, ProviderResult};
use crate::Error;

/// System instruction for multi-provider fan-out rounds.
pub const MULTI_MODEL_SYSTEM_INSTRUCTION: &str = "You are an expert SAP developer specializing in ABAP, SAP CAPM (Node.js), and enterprise architecture. Provide clean, secure, and highly optimized code.";

/// System instruction for single-provider chat continuation.
pub const CHAT_SYSTEM_INSTRUCTION: &str =
    "You are an expert SAP developer specializing in ABAP and SAP CAPM.";

/// Placeholder id used when an adapter task escapes its own guard.
const UNKNOWN_PROVIDER_ID: &str = "unknown";

/// Coordinates concurrent fan-out and single-provider dispatch over a
/// [`ProviderRegistry`].
pub struct Dispatcher {
    registry: ProviderRegistry,
}

impl Dispatcher {
    pub fn new(registry: ProviderRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Invoke every registered provider concurrently with the same prompt and
    /// wait for all of them to settle.
    ///
    /// Always returns exactly one [`ProviderResult`] per registered provider,
    /// in registration order, regardless of which providers failed. The only
    /// hard error is an empty prompt, rejected before any network call.
    pub async fn dispatch_all(&self, prompt: &str) -> Result<Vec<ProviderResult>, Error> {
        if prompt.trim().is_empty() {
            return Err(Error::invalid_request("prompt must not be empty"));
        }

        let request = Arc::new(DispatchRequest::new(
            prompt,
            MULTI_MODEL_SYSTEM_INSTRUCTION,
        ));
        debug!(providers = self.registry.len(), "dispatching prompt to all providers");

        // One task per adapter so a slow provider never delays the others
        // issuing their calls. join_all preserves registration order.
        let handles: Vec<_> = self
            .registry
            .providers()
            .iter()
            .map(|provider| {
                let provider = Arc::clone(provider);
                let request = Arc::clone(&request);
                tokio::spawn(async move { provider.invoke(&request).await })
            })
            .collect();

        let outcomes = join_all(handles).await;

        Ok(outcomes
            .into_iter()
            .map(|outcome| match outcome {
                Ok(result) => {
                    if result.failed {
                        warn!(provider = %result.provider_id, content = %result.content, "provider call failed");
                    }
                    result
                }
                // An adapter panicking past its own guard must not shorten
                // the result list.
                Err(e) => {
                    error!("provider task aborted: {e}");
                    ProviderResult::failure(
                        UNKNOWN_PROVIDER_ID,
                        format!("provider task aborted: {e}"),
                        0,
                    )
                }
            })
            .collect())
    }

    /// Invoke exactly one provider by id and return its reply text.
    ///
    /// History is accepted for forward compatibility with multi-turn chat;
    /// no current adapter consumes it. An unknown id is rejected as a client
    /// error before any call; a failed adapter result becomes an upstream
    /// error naming the provider.
    pub async fn send_one(
        &self,
        provider_id: &str,
        prompt: &str,
        history: &[ChatTurn],
    ) -> Result<String, Error> {
        let provider = self
            .registry
            .get(provider_id)
            .ok_or_else(|| Error::UnsupportedProvider(provider_id.to_string()))?;

        let _ = history;

        let request = DispatchRequest::new(prompt, CHAT_SYSTEM_INSTRUCTION);
        let result = provider.invoke(&request).await;

        if result.failed {
            warn!(provider = provider_id, content = %result.content, "chat call failed");
            return Err(Error::upstream(provider_id, result.content));
        }

        Ok(result.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ModelProvider;
    use crate::registry::ProviderRegistry;

    /// Adapter stub with a fixed outcome.
    struct StubProvider {
        id: &'static str,
        reply: Option<&'static str>,
    }

    #[async_trait::async_trait]
    impl ModelProvider for StubProvider {
        fn id(&self) -> &'static str {
            self.id
        }

        async fn invoke(&self, _request: &DispatchRequest) -> ProviderResult {
            match self.reply {
                Some(text) => ProviderResult::success(self.id, text, 1),
                None => ProviderResult::failure(self.id, "credential missing", 0),
            }
        }
    }

    /// Adapter that escapes its guard, for the fallback path.
    struct PanickingProvider;

    #[async_trait::async_trait]
    impl ModelProvider for PanickingProvider {
        fn id(&self) -> &'static str {
            "broken"
        }

        async fn invoke(&self, _request: &DispatchRequest) -> ProviderResult {
            panic!("adapter escaped its guard");
        }
    }

    fn stub_registry() -> ProviderRegistry {
        ProviderRegistry::from_adapters(vec![
            Arc::new(StubProvider {
                id: "alpha",
                reply: Some("first"),
            }),
            Arc::new(StubProvider {
                id: "beta",
                reply: None,
            }),
            Arc::new(StubProvider {
                id: "gamma",
                reply: Some("third"),
            }),
        ])
    }

    #[tokio::test]
    async fn test_dispatch_all_preserves_declared_order() {
        let dispatcher = Dispatcher::new(stub_registry());
        let results = dispatcher.dispatch_all("hi").await.unwrap();

        let ids: Vec<_> = results.iter().map(|r| r.provider_id.as_str()).collect();
        assert_eq!(ids, vec!["alpha", "beta", "gamma"]);
        assert!(!results[0].failed);
        assert!(results[1].failed);
        assert!(!results[2].failed);
    }

    #[tokio::test]
    async fn test_dispatch_all_rejects_empty_prompt() {
        let dispatcher = Dispatcher::new(stub_registry());
        let error = dispatcher.dispatch_all("   ").await.unwrap_err();
        assert_eq!(error.status_code(), 400);
    }

    #[tokio::test]
    async fn test_panicking_adapter_yields_fallback_entry() {
        let dispatcher = Dispatcher::new(ProviderRegistry::from_adapters(vec![
            Arc::new(StubProvider {
                id: "alpha",
                reply: Some("ok"),
            }),
            Arc::new(PanickingProvider),
            Arc::new(StubProvider {
                id: "gamma",
                reply: Some("ok"),
            }),
        ]));

        let results = dispatcher.dispatch_all("hi").await.unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[1].provider_id, "unknown");
        assert!(results[1].failed);
        assert!(!results[0].failed);
        assert!(!results[2].failed);
    }

    #[tokio::test]
    async fn test_send_one_unknown_provider_is_client_error() {
        let dispatcher = Dispatcher::new(stub_registry());
        let error = dispatcher
            .send_one("nonexistent-provider", "hi", &[])
            .await
            .unwrap_err();

        assert_eq!(error.status_code(), 400);
        assert!(error.to_string().contains("nonexistent-provider"));
    }

    #[tokio::test]
    async fn test_send_one_failed_adapter_is_upstream_error() {
        let dispatcher = Dispatcher::new(stub_registry());
        let error = dispatcher.send_one("beta", "hi", &[]).await.unwrap_err();

        assert_eq!(error.status_code(), 500);
        assert!(error.to_string().contains("beta"));
        assert!(error.to_string().contains("credential"));
    }

    #[tokio::test]
    async fn test_send_one_returns_reply_text() {
        let dispatcher = Dispatcher::new(stub_registry());
        let history = vec![ChatTurn::user("earlier"), ChatTurn::assistant("reply")];
        let text = dispatcher.send_one("alpha", "hi", &history).await.unwrap();
        assert_eq!(text, "first");
    }
}
