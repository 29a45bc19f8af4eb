//! Conversation log types for stratboard.
//!
//! A conversation log is the persisted snapshot of one session: the full
//! message history, the selected board members, and the language, stamped
//! at write time. One record exists per session id; later writes replace
//! earlier ones entirely.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Language;

// Re-export message types (used in both chat and completion contexts).
pub use crate::llm::{Message, MessageRole};

/// Persisted snapshot of a session's conversation.
///
/// Stored under `chats/{session_id}` in the document store. The timestamp
/// is captured when the record is written, not when the session started.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationLog {
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
    pub messages: Vec<Message>,
    pub board_members: Vec<String>,
    pub language: Language,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation_log_serialize() {
        let log = ConversationLog {
            session_id: "0192d3c4-aaaa-7bbb-8ccc-ddddeeee0001".to_string(),
            timestamp: Utc::now(),
            messages: vec![Message::user("hello"), Message::assistant("hi")],
            board_members: vec!["Laozi".to_string()],
            language: Language::English,
        };
        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(json["language"], "English");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["board_members"][0], "Laozi");
    }

    #[test]
    fn test_message_role_reexport() {
        let role = MessageRole::User;
        assert_eq!(role.to_string(), "user");
    }
}
