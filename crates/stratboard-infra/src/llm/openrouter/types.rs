//! OpenRouter chat-completions API types.
//!
//! These are OpenRouter-specific response structures used for HTTP
//! communication. The outbound body is the generic
//! [`stratboard_types::llm::CompletionRequest`], which already serializes
//! to exactly the JSON the endpoint expects; only the response shapes need
//! dedicated types here.

use serde::Deserialize;

/// Response body from `POST /chat/completions`.
///
/// A well-formed response carries either `choices` or an `error` object;
/// both are optional here so the client can decide which case it is in.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenRouterResponse {
    pub id: Option<String>,
    pub model: Option<String>,
    pub choices: Option<Vec<OpenRouterChoice>>,
    pub error: Option<OpenRouterError>,
}

/// A single completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenRouterChoice {
    pub message: OpenRouterChoiceMessage,
}

/// The message object inside a choice.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenRouterChoiceMessage {
    pub content: String,
}

/// An error object inside an otherwise well-formed response body.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenRouterError {
    pub message: Option<String>,
    pub code: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_response_deserialization() {
        let json = r#"{
            "id": "gen-123",
            "model": "openai/gpt-4o-2024-11-20",
            "choices": [{"message": {"role": "assistant", "content": "Hello!"}}]
        }"#;
        let resp: OpenRouterResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.id.as_deref(), Some("gen-123"));
        let choices = resp.choices.unwrap();
        assert_eq!(choices[0].message.content, "Hello!");
        assert!(resp.error.is_none());
    }

    #[test]
    fn test_error_response_deserialization() {
        let json = r#"{"error": {"message": "Invalid model", "code": 400}}"#;
        let resp: OpenRouterResponse = serde_json::from_str(json).unwrap();
        assert!(resp.choices.is_none());
        let error = resp.error.unwrap();
        assert_eq!(error.message.as_deref(), Some("Invalid model"));
        assert_eq!(error.code, Some(400));
    }

    #[test]
    fn test_response_without_choices_or_error() {
        let json = r#"{"id": "gen-456"}"#;
        let resp: OpenRouterResponse = serde_json::from_str(json).unwrap();
        assert!(resp.choices.is_none());
        assert!(resp.error.is_none());
    }
}
