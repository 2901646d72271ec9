//! Provider adapter implementations for the supported LLM services.

pub mod claude;
pub mod gemini;
pub mod openai;

// Re-export commonly used provider types
pub use claude::ClaudeProvider;
pub use gemini::GeminiProvider;
pub use openai::OpenAIProvider;
