use serde::{Deserialize, Serialize};

/// Normalized outcome of one provider invocation.
///
/// Produced fresh per call and never persisted. `content` holds the reply
/// text on success, or a human-readable failure description when `failed` is
/// set. Field names serialize in camelCase to match the service wire shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderResult {
    pub provider_id: String,
    pub content: String,
    pub latency_ms: u64,
    pub failed: bool,
}

impl ProviderResult {
    /// Build a successful result.
    pub fn success(
        provider_id: impl Into<String>,
        content: impl Into<String>,
        latency_ms: u64,
    ) -> Self {
        Self {
            provider_id: provider_id.into(),
            content: content.into(),
            latency_ms,
            failed: false,
        }
    }

    /// Build a failed result carrying a diagnostic message as content.
    pub fn failure(
        provider_id: impl Into<String>,
        message: impl Into<String>,
        latency_ms: u64,
    ) -> Self {
        Self {
            provider_id: provider_id.into(),
            content: message.into(),
            latency_ms,
            failed: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_constructors() {
        let ok = ProviderResult::success("gemini", "hello", 42);
        assert!(!ok.failed);
        assert_eq!(ok.provider_id, "gemini");
        assert_eq!(ok.latency_ms, 42);

        let err = ProviderResult::failure("claude", "HTTP 500", 0);
        assert!(err.failed);
        assert_eq!(err.content, "HTTP 500");
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = ProviderResult::success("gpt4o", "ok", 7);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["providerId"], "gpt4o");
        assert_eq!(json["latencyMs"], 7);
        assert_eq!(json["failed"], false);
    }
}
