use serde::{Deserialize, Serialize};

/// Gemini `generateContent` request format.
#[derive(Debug, Clone, Serialize)]
pub struct GeminiRequest {
    pub system_instruction: GeminiSystemInstruction,
    pub contents: Vec<GeminiContent>,
}

/// System instruction wrapper. The API accepts `parts` as a single object
/// here, unlike the array used in `contents`.
#[derive(Debug, Clone, Serialize)]
pub struct GeminiSystemInstruction {
    pub parts: GeminiPart,
}

/// Gemini content (message) format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiContent {
    pub parts: Vec<GeminiPart>,
}

/// A single text part.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiPart {
    pub text: String,
}

/// Gemini API response.
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

/// Gemini response candidate.
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiCandidate {
    pub content: GeminiContent,
}

impl GeminiResponse {
    /// Extract the reply text at `candidates[0].content.parts[0].text`,
    /// or `None` if the response shape is not what a success should carry.
    pub fn reply_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content
            .parts
            .into_iter()
            .next()
            .map(|part| part.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_text_extraction() {
        let response: GeminiResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"WRITE 'Hello World'."}]}}]}"#,
        )
        .unwrap();
        assert_eq!(
            response.reply_text(),
            Some("WRITE 'Hello World'.".to_string())
        );
    }

    #[test]
    fn test_reply_text_guards_empty_candidates() {
        let response: GeminiResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert_eq!(response.reply_text(), None);

        let response: GeminiResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(response.reply_text(), None);
    }
}
