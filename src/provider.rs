use crate::types::{DispatchRequest, ProviderResult};

/// A trait for provider adapters that can answer a dispatch request.
///
/// `invoke` never fails: every failure mode (missing credential, transport
/// error, non-success status, malformed body) is captured and returned as a
/// [`ProviderResult`] with `failed = true`, so the fan-out join stays a pure
/// collection step.
#[async_trait::async_trait]
pub trait ModelProvider: Send + Sync + 'static {
    /// Stable identifier for this provider, unique within a registry.
    fn id(&self) -> &'static str;

    /// Perform one outbound call and normalize the outcome.
    async fn invoke(&self, request: &DispatchRequest) -> ProviderResult;
}
