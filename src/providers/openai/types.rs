use serde::{Deserialize, Serialize};

/// OpenAI chat-completions request format.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionsRequest {
    pub model: String,
    pub messages: Vec<ChatCompletionsMessage>,
}

/// A single message in the messages array.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionsMessage {
    pub role: String,
    pub content: String,
}

/// OpenAI chat-completions response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionsResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

/// One completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

/// The assistant message inside a choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionsResponse {
    /// Extract the reply from the first choice's message content, or `None`
    /// if no choice or content is present.
    pub fn reply_text(self) -> Option<String> {
        self.choices.into_iter().next()?.message.content
    }
}
