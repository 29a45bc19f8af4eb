//! The chat turn endpoint.
//!
//! POST /api/v1/sessions/{id}/messages
//!
//! One user turn: append the user message, re-fetch config, run the
//! completion over the full history, append the reply, and persist the
//! conversation snapshot unless the session is anonymous. The reply is
//! always a string -- completion failures surface as localized apology
//! text, not as HTTP errors.

use std::time::Instant;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::http::error::AppError;
use crate::http::handlers::session::{parse_uuid, SessionView};
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for a chat turn.
#[derive(Debug, Deserialize)]
pub struct PostMessageRequest {
    /// The user message to put before the board.
    pub content: String,
}

/// Response payload for a chat turn.
#[derive(Debug, Serialize)]
pub struct TurnView {
    /// The assistant's reply (possibly an apology string).
    pub reply: String,
    /// Session snapshot after the turn.
    pub session: SessionView,
}

/// POST /api/v1/sessions/{id}/messages - Run one chat turn.
pub async fn post_message(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(body): Json<PostMessageRequest>,
) -> Result<Json<ApiResponse<TurnView>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    if body.content.trim().is_empty() {
        return Err(AppError::Validation("Message must not be empty".to_string()));
    }

    let sid = parse_uuid(&session_id)?;

    // Append the user message and snapshot what the turn needs. The map
    // entry is released before the completion call: it must never be held
    // across an await.
    let (history, board_members, language, anonymous, current_id) = {
        let mut session = state
            .sessions
            .get_mut(&sid)
            .ok_or_else(|| AppError::NotFound(format!("Session {sid} not found")))?;
        if session.board_members().is_empty() {
            return Err(AppError::Validation(
                "Select at least one board member before chatting".to_string(),
            ));
        }
        session.push_user(body.content);
        (
            session.messages().to_vec(),
            session.board_members().to_vec(),
            session.language(),
            session.anonymous(),
            session.id(),
        )
    };

    // Config is re-fetched from the store on every turn; built-in defaults
    // apply when the store is unavailable.
    let config = state
        .config_service
        .get_or_init()
        .await
        .unwrap_or_default();

    let reply = state
        .chat_service
        .get_reply(&history, &board_members, language, &config.system_prompts)
        .await;

    // Re-acquire the entry to append the reply.
    let (messages, view) = {
        let mut session = state
            .sessions
            .get_mut(&sid)
            .ok_or_else(|| AppError::NotFound(format!("Session {sid} not found")))?;
        session.push_assistant(reply.clone());
        (session.messages().to_vec(), SessionView::from(&*session))
    };

    if !anonymous {
        state
            .log_service
            .log_conversation(&current_id.to_string(), &messages, &board_members, language)
            .await;
    }

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        TurnView { reply, session: view },
        request_id,
        elapsed,
    )))
}
