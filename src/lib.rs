//! Concurrent fan-out dispatch across multiple LLM provider APIs.
//!
//! This library sends one prompt to Google Gemini, Anthropic Claude, and
//! OpenAI concurrently, tolerates partial failure, and normalizes every
//! outcome into one [`ProviderResult`] per provider. It also supports
//! single-provider chat continuation via [`Dispatcher::send_one`].

pub mod dispatch;
pub mod error;
pub mod provider;
pub mod providers;
pub mod registry;
pub mod types;

// Re-export core types for easy usage
pub use dispatch::Dispatcher;
pub use error::Error;
pub use provider::ModelProvider;
pub use providers::*;
pub use registry::{Credentials, ProviderRegistry};
pub use types::*;
