use serde::{Deserialize, Serialize};

/// Immutable input to every adapter in one fan-out round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchRequest {
    pub prompt: String,
    pub system_instruction: String,
}

impl DispatchRequest {
    pub fn new(prompt: impl Into<String>, system_instruction: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_instruction: system_instruction.into(),
        }
    }
}

/// One prior turn of a conversation, carried through single-provider chat.
///
/// History is opaque to the dispatch core: it is accepted and passed along
/// for future multi-turn support, but no current adapter consumes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    /// Create a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        ChatTurn {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        ChatTurn {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Role of a message participant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_turn_constructors() {
        let turn = ChatTurn::user("hi");
        assert_eq!(turn.role, Role::User);
        assert_eq!(turn.content, "hi");

        let turn = ChatTurn::assistant("hello");
        assert_eq!(turn.role, Role::Assistant);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            "\"assistant\""
        );
    }
}
