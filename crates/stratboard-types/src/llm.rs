//! Completion request/response types for stratboard.
//!
//! These types model the data shapes for the remote chat-completion API:
//! message roles, the outbound request body, and error handling.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(MessageRole::System),
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A single message in a conversation.
///
/// The same shape is used for the in-memory session history, the outbound
/// completion request body, and the persisted conversation log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Request body for the remote completion endpoint.
///
/// Serializes to exactly the JSON the endpoint expects:
/// `{"model": ..., "temperature": ..., "messages": [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub temperature: f64,
    pub messages: Vec<Message>,
}

/// Response from the remote completion endpoint for a single request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Provider-assigned response id, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Model that produced the reply, when reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// The first choice's message content, verbatim.
    pub content: String,
}

/// Errors from completion provider operations.
///
/// `Transport` covers connection failures and non-2xx statuses; the other
/// variants cover well-formed-but-erroring response bodies. Callers use
/// [`LlmError::is_transport`] to pick the matching user-facing fallback.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("api error: {message}")]
    Api { message: String },

    #[error("response missing 'choices'")]
    MissingChoices,

    #[error("deserialization error: {0}")]
    Deserialization(String),
}

impl LlmError {
    /// Whether this error happened before a well-formed response arrived.
    pub fn is_transport(&self) -> bool {
        matches!(self, LlmError::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_role_roundtrip() {
        for role in [MessageRole::System, MessageRole::User, MessageRole::Assistant] {
            let s = role.to_string();
            let parsed: MessageRole = s.parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_message_role_serde() {
        let role = MessageRole::Assistant;
        let json = serde_json::to_string(&role).unwrap();
        assert_eq!(json, "\"assistant\"");
        let parsed: MessageRole = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, MessageRole::Assistant);
    }

    #[test]
    fn test_completion_request_wire_shape() {
        let request = CompletionRequest {
            model: "openai/gpt-4o-2024-11-20".to_string(),
            temperature: 1.0,
            messages: vec![Message::system("prompt"), Message::user("hello")],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "openai/gpt-4o-2024-11-20");
        assert_eq!(json["temperature"], 1.0);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hello");
    }

    #[test]
    fn test_llm_error_is_transport() {
        assert!(LlmError::Transport("connection refused".to_string()).is_transport());
        assert!(!LlmError::MissingChoices.is_transport());
        assert!(
            !LlmError::Api {
                message: "bad model".to_string()
            }
            .is_transport()
        );
    }

    #[test]
    fn test_message_constructors() {
        assert_eq!(Message::user("hi").role, MessageRole::User);
        assert_eq!(Message::assistant("yo").role, MessageRole::Assistant);
        assert_eq!(Message::system("sys").content, "sys");
    }
}
