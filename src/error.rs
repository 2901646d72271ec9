use thiserror::Error;

/// Errors that can occur when using the fanout-llm library.
///
/// Individual provider failures during fan-out are not errors: they are
/// reported as failed [`crate::ProviderResult`] entries. This enum covers the
/// hard failures only.
#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP client setup failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),

    #[error("Provider call failed: {provider} - {message}")]
    Upstream { provider: String, message: String },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Error::InvalidRequest(message.into())
    }

    pub fn upstream(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Upstream {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    /// HTTP-like status classification: client errors (bad prompt, unknown
    /// provider id) are 400, everything else is 500.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::InvalidRequest(_) | Error::UnsupportedProvider(_) => 400,
            _ => 500,
        }
    }
}
