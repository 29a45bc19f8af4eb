//! Conversation log persistence and retrieval.
//!
//! One log record per session id under `chats/{session_id}`; every write
//! replaces the previous snapshot entirely, so only the latest full history
//! survives for a given id. Retrieval tolerates individually malformed
//! records and never fails: an unavailable store yields an empty list.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use stratboard_types::chat::ConversationLog;
use stratboard_types::config::Language;
use stratboard_types::llm::Message;

use crate::store::DocumentStore;

/// Store path under which per-session records live.
const CHATS_PATH: &str = "chats";

/// Upper bound on records returned by a bulk retrieval.
const MAX_LOG_RECORDS: usize = 100;

/// Persists and retrieves per-session conversation snapshots.
///
/// Like [`crate::config::ConfigService`], holds `Option<S>`: with no store
/// connection every write is a silent no-op and every read returns empty.
pub struct ConversationLogService<S: DocumentStore> {
    store: Option<S>,
}

// ---------------------------------------------------------------------------
// Private row type for store-to-domain mapping
// ---------------------------------------------------------------------------

/// Raw record shape as stored. Missing fields default; fields present with
/// the wrong type make the whole record unparseable (and thus skipped).
#[derive(Debug, Deserialize)]
struct LogRow {
    timestamp: Option<String>,
    #[serde(default)]
    messages: Vec<Message>,
    #[serde(default)]
    board_members: Vec<String>,
    #[serde(default)]
    language: Language,
}

impl LogRow {
    fn into_log(self, session_id: String) -> Result<ConversationLog, String> {
        let timestamp = match self.timestamp {
            Some(raw) => parse_timestamp(&raw)?,
            None => Utc::now(),
        };

        Ok(ConversationLog {
            session_id,
            timestamp,
            messages: self.messages,
            board_members: self.board_members,
            language: self.language,
        })
    }
}

/// Parse an ISO-8601 timestamp, with or without a UTC offset.
///
/// Offset-free timestamps occur in records written by earlier deployments;
/// they are interpreted as UTC.
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    raw.parse::<NaiveDateTime>()
        .map(|naive| naive.and_utc())
        .map_err(|e| format!("invalid timestamp '{raw}': {e}"))
}

impl<S: DocumentStore> ConversationLogService<S> {
    /// Create a log service over an optional store connection.
    pub fn new(store: Option<S>) -> Self {
        Self { store }
    }

    /// Overwrite the log record for `session_id` with a fresh snapshot.
    ///
    /// The timestamp is captured here, at write time. Silently does nothing
    /// when the store is unavailable; write failures are logged, never
    /// returned.
    pub async fn log_conversation(
        &self,
        session_id: &str,
        messages: &[Message],
        board_members: &[String],
        language: Language,
    ) {
        let Some(store) = self.store.as_ref() else {
            return;
        };

        let record = json!({
            "timestamp": Utc::now().to_rfc3339(),
            "messages": messages,
            "board_members": board_members,
            "language": language,
        });

        let path = format!("{CHATS_PATH}/{session_id}");
        if let Err(err) = store.set(&path, &record).await {
            warn!(session_id, error = %err, "failed to log conversation");
        }
    }

    /// Fetch all log records, newest first, capped at 100.
    ///
    /// Records that fail to parse are skipped individually with a warning;
    /// an unavailable or empty store yields an empty list.
    pub async fn get_conversation_logs(&self) -> Vec<ConversationLog> {
        let Some(store) = self.store.as_ref() else {
            return Vec::new();
        };

        let entries = match store.get(CHATS_PATH).await {
            Ok(Some(serde_json::Value::Object(entries))) => entries,
            Ok(Some(other)) => {
                warn!(kind = value_kind(&other), "chats root is not an object");
                return Vec::new();
            }
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(error = %err, "failed to retrieve conversation logs");
                return Vec::new();
            }
        };

        let mut logs = Vec::with_capacity(entries.len());
        for (session_id, value) in entries {
            match parse_record(session_id.clone(), value) {
                Ok(log) => logs.push(log),
                Err(err) => {
                    warn!(session_id, error = %err, "skipping malformed log record");
                }
            }
        }

        logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        logs.truncate(MAX_LOG_RECORDS);
        logs
    }
}

fn parse_record(session_id: String, value: serde_json::Value) -> Result<ConversationLog, String> {
    let row: LogRow = serde_json::from_value(value).map_err(|e| e.to_string())?;
    row.into_log(session_id)
}

fn value_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record_defaults_missing_fields() {
        let log = parse_record("sid".to_string(), json!({})).unwrap();
        assert_eq!(log.session_id, "sid");
        assert!(log.messages.is_empty());
        assert!(log.board_members.is_empty());
        assert_eq!(log.language, Language::English);
    }

    #[test]
    fn test_parse_record_rejects_wrong_types() {
        let err = parse_record("sid".to_string(), json!({"messages": "not a list"})).unwrap_err();
        assert!(err.contains("messages") || !err.is_empty());

        assert!(parse_record("sid".to_string(), json!("not an object")).is_err());
    }

    #[test]
    fn test_parse_record_rejects_bad_timestamp() {
        let value = json!({"timestamp": "yesterday-ish"});
        assert!(parse_record("sid".to_string(), value).is_err());
    }

    #[test]
    fn test_parse_timestamp_accepts_offset_free() {
        let parsed = parse_timestamp("2025-03-01T12:30:00.123456").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2025-03-01T12:30:00.123456+00:00");
    }

    #[test]
    fn test_parse_timestamp_accepts_rfc3339() {
        let now = Utc::now();
        let parsed = parse_timestamp(&now.to_rfc3339()).unwrap();
        assert_eq!(parsed, now);
    }
}
