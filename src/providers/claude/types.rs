use serde::{Deserialize, Serialize};

/// Anthropic messages API request format.
#[derive(Debug, Clone, Serialize)]
pub struct ClaudeRequest {
    pub model: String,
    pub max_tokens: u32,
    pub system: String,
    pub messages: Vec<ClaudeMessage>,
}

/// A single message in the messages array.
#[derive(Debug, Clone, Serialize)]
pub struct ClaudeMessage {
    pub role: String,
    pub content: String,
}

/// Anthropic messages API response.
#[derive(Debug, Clone, Deserialize)]
pub struct ClaudeResponse {
    #[serde(default)]
    pub content: Vec<ClaudeContentBlock>,
}

/// A content block in the response. Only text blocks carry a reply.
#[derive(Debug, Clone, Deserialize)]
pub struct ClaudeContentBlock {
    #[serde(default)]
    pub text: Option<String>,
}

impl ClaudeResponse {
    /// Extract the reply as the text of the first content block, or `None`
    /// if the block list is empty or the first block carries no text.
    pub fn reply_text(self) -> Option<String> {
        self.content.into_iter().next()?.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_text_extraction() {
        let response: ClaudeResponse = serde_json::from_str(
            r#"{"content":[{"type":"text","text":"Hello from Claude"}],"role":"assistant"}"#,
        )
        .unwrap();
        assert_eq!(response.reply_text(), Some("Hello from Claude".to_string()));
    }

    #[test]
    fn test_reply_text_guards_missing_blocks() {
        let response: ClaudeResponse = serde_json::from_str(r#"{"content":[]}"#).unwrap();
        assert_eq!(response.reply_text(), None);

        let response: ClaudeResponse =
            serde_json::from_str(r#"{"content":[{"type":"tool_use"}]}"#).unwrap();
        assert_eq!(response.reply_text(), None);
    }
}
