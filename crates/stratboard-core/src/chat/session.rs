//! Per-session conversation state.
//!
//! A session is one browser-tab-scoped conversation: a generated id, the
//! selected language, the ordered board member selection, and the message
//! history. All mutation goes through methods here so the member cap and
//! uniqueness rules hold no matter which surface drives the session.

use serde::Serialize;
use uuid::Uuid;

use stratboard_types::config::Language;
use stratboard_types::error::SessionError;
use stratboard_types::llm::Message;

/// Maximum board members per session, default and custom combined.
pub const MAX_BOARD_MEMBERS: usize = 12;

/// Coarse session phase, derived from the member selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// No board members selected yet; the session cannot take a turn.
    Idle,
    /// At least one member selected; ready for the next user message.
    AwaitingInput,
}

/// Ephemeral state of one conversation.
///
/// Owned exclusively by the surface that created it (single writer).
/// Nothing here touches the store: persistence is the caller's concern.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    id: Uuid,
    language: Language,
    board_members: Vec<String>,
    messages: Vec<Message>,
    anonymous: bool,
}

impl Session {
    /// Create a fresh session with a generated id and empty history.
    pub fn new(anonymous: bool) -> Self {
        Self {
            id: Uuid::now_v7(),
            language: Language::default(),
            board_members: Vec::new(),
            messages: Vec::new(),
            anonymous,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn board_members(&self) -> &[String] {
        &self.board_members
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn anonymous(&self) -> bool {
        self.anonymous
    }

    pub fn phase(&self) -> SessionPhase {
        if self.board_members.is_empty() {
            SessionPhase::Idle
        } else {
            SessionPhase::AwaitingInput
        }
    }

    /// Add a board member, preserving selection order.
    ///
    /// Rejects duplicates and additions beyond [`MAX_BOARD_MEMBERS`]; the
    /// selection is left unchanged in both cases.
    pub fn add_board_member(&mut self, name: impl Into<String>) -> Result<(), SessionError> {
        let name = name.into();
        if self.board_members.iter().any(|m| *m == name) {
            return Err(SessionError::DuplicateMember(name));
        }
        if self.board_members.len() >= MAX_BOARD_MEMBERS {
            return Err(SessionError::BoardFull {
                max: MAX_BOARD_MEMBERS,
            });
        }
        self.board_members.push(name);
        Ok(())
    }

    /// Remove a board member by name. Returns whether it was present.
    pub fn remove_board_member(&mut self, name: &str) -> bool {
        let before = self.board_members.len();
        self.board_members.retain(|m| m != name);
        self.board_members.len() != before
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
    }

    /// Start a new conversation: fresh id, cleared history.
    ///
    /// The language and board member selection are deliberately kept.
    pub fn new_chat(&mut self) {
        self.id = Uuid::now_v7();
        self.messages.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_idle() {
        let session = Session::new(false);
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(session.messages().is_empty());
        assert!(!session.anonymous());
    }

    #[test]
    fn test_add_member_transitions_to_awaiting_input() {
        let mut session = Session::new(false);
        session.add_board_member("Laozi").unwrap();
        assert_eq!(session.phase(), SessionPhase::AwaitingInput);
        assert_eq!(session.board_members(), ["Laozi"]);
    }

    #[test]
    fn test_duplicate_member_rejected() {
        let mut session = Session::new(false);
        session.add_board_member("Laozi").unwrap();
        let err = session.add_board_member("Laozi").unwrap_err();
        assert_eq!(err, SessionError::DuplicateMember("Laozi".to_string()));
        assert_eq!(session.board_members().len(), 1);
    }

    #[test]
    fn test_thirteenth_member_rejected() {
        let mut session = Session::new(false);
        for i in 0..MAX_BOARD_MEMBERS {
            session.add_board_member(format!("Member {i}")).unwrap();
        }
        let err = session.add_board_member("One Too Many").unwrap_err();
        assert_eq!(err, SessionError::BoardFull { max: 12 });
        assert_eq!(session.board_members().len(), MAX_BOARD_MEMBERS);
    }

    #[test]
    fn test_remove_member() {
        let mut session = Session::new(false);
        session.add_board_member("Laozi").unwrap();
        session.add_board_member("Adam Grant").unwrap();

        assert!(session.remove_board_member("Laozi"));
        assert!(!session.remove_board_member("Laozi"));
        assert_eq!(session.board_members(), ["Adam Grant"]);
    }

    #[test]
    fn test_selection_order_preserved() {
        let mut session = Session::new(false);
        for name in ["C", "A", "B"] {
            session.add_board_member(name).unwrap();
        }
        assert_eq!(session.board_members(), ["C", "A", "B"]);
    }

    #[test]
    fn test_new_chat_keeps_selection_and_language() {
        let mut session = Session::new(true);
        session.set_language(Language::Russian);
        session.add_board_member("Laozi").unwrap();
        session.push_user("hello");
        session.push_assistant("hi");
        let old_id = session.id();

        session.new_chat();

        assert_ne!(session.id(), old_id);
        assert!(session.messages().is_empty());
        assert_eq!(session.board_members(), ["Laozi"]);
        assert_eq!(session.language(), Language::Russian);
        assert!(session.anonymous());
    }

    #[test]
    fn test_push_messages_in_order() {
        let mut session = Session::new(false);
        session.push_user("question");
        session.push_assistant("answer");

        let roles: Vec<String> = session
            .messages()
            .iter()
            .map(|m| m.role.to_string())
            .collect();
        assert_eq!(roles, ["user", "assistant"]);
    }
}
