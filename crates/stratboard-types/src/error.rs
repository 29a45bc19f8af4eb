use thiserror::Error;

use crate::config::Language;

/// Errors from document store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Transport(String),

    #[error("store returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid store payload: {0}")]
    Payload(String),
}

/// Errors from system prompt composition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("no system prompt template for language '{0}'")]
    MissingLanguage(Language),
}

/// Validation errors for per-session board member edits.
///
/// These are warnings surfaced to the user, never process failures: the
/// board selection is left unchanged when one is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("the board is full ({max} members maximum)")]
    BoardFull { max: usize },

    #[error("'{0}' is already on the board")]
    DuplicateMember(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Status {
            status: 503,
            body: "unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "store returned HTTP 503: unavailable");
    }

    #[test]
    fn test_prompt_error_display() {
        let err = PromptError::MissingLanguage(Language::Russian);
        assert!(err.to_string().contains("Russian"));
    }

    #[test]
    fn test_session_error_display() {
        let err = SessionError::DuplicateMember("Laozi".to_string());
        assert_eq!(err.to_string(), "'Laozi' is already on the board");
        let err = SessionError::BoardFull { max: 12 };
        assert!(err.to_string().contains("12"));
    }
}
