//! Session lifecycle HTTP handlers.
//!
//! Endpoints:
//! - POST   /api/v1/sessions                          - Create a session
//! - GET    /api/v1/sessions/{id}                     - Session snapshot
//! - POST   /api/v1/sessions/{id}/new-chat            - Fresh id, cleared history
//! - PUT    /api/v1/sessions/{id}/language            - Switch language
//! - POST   /api/v1/sessions/{id}/board-members       - Add a member
//! - DELETE /api/v1/sessions/{id}/board-members/{name} - Remove a member

use std::time::Instant;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stratboard_core::chat::session::{Session, SessionPhase};
use stratboard_types::config::Language;
use stratboard_types::llm::Message;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for session creation. Send `{}` for the defaults.
#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    /// Suppress conversation log writes for this session.
    #[serde(default)]
    pub anonymous: bool,
}

/// Request body for the language switch.
#[derive(Debug, Deserialize)]
pub struct SetLanguageRequest {
    pub language: Language,
}

/// Request body for adding a board member.
#[derive(Debug, Deserialize)]
pub struct AddBoardMemberRequest {
    pub name: String,
}

/// Serializable snapshot of a session.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub language: Language,
    pub phase: SessionPhase,
    pub board_members: Vec<String>,
    pub messages: Vec<Message>,
    pub anonymous: bool,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id(),
            language: session.language(),
            phase: session.phase(),
            board_members: session.board_members().to_vec(),
            messages: session.messages().to_vec(),
            anonymous: session.anonymous(),
        }
    }
}

/// Parse a UUID from a path parameter, returning a 400 error on invalid format.
pub(crate) fn parse_uuid(s: &str) -> Result<Uuid, AppError> {
    s.parse::<Uuid>()
        .map_err(|_| AppError::Validation(format!("Invalid UUID: {s}")))
}

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}

/// POST /api/v1/sessions - Create a session.
pub async fn create_session(
    State(state): State<AppState>,
    Json(body): Json<CreateSessionRequest>,
) -> Result<Json<ApiResponse<SessionView>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let session = Session::new(body.anonymous);
    let view = SessionView::from(&session);
    state.sessions.insert(session.id(), session);

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(view, request_id, elapsed)))
}

/// GET /api/v1/sessions/{id} - Session snapshot.
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<SessionView>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;
    let session = state.sessions.get(&sid).ok_or_else(|| session_not_found(sid))?;
    let view = SessionView::from(&*session);

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(view, request_id, elapsed)))
}

/// POST /api/v1/sessions/{id}/new-chat - Fresh id and cleared history.
///
/// Language and board selection carry over. The session moves in the map
/// to its regenerated id, so the old id stops resolving.
pub async fn new_chat(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<SessionView>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;
    let (_, mut session) = state
        .sessions
        .remove(&sid)
        .ok_or_else(|| session_not_found(sid))?;
    session.new_chat();
    let view = SessionView::from(&session);
    state.sessions.insert(session.id(), session);

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(view, request_id, elapsed)))
}

/// PUT /api/v1/sessions/{id}/language - Switch the interface language.
pub async fn set_language(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(body): Json<SetLanguageRequest>,
) -> Result<Json<ApiResponse<SessionView>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;
    let mut session = state
        .sessions
        .get_mut(&sid)
        .ok_or_else(|| session_not_found(sid))?;
    session.set_language(body.language);
    let view = SessionView::from(&*session);

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(view, request_id, elapsed)))
}

/// POST /api/v1/sessions/{id}/board-members - Add a board member.
///
/// Rejections (cap of 12, duplicate name) come back as 400 warnings and
/// leave the selection unchanged.
pub async fn add_board_member(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(body): Json<AddBoardMemberRequest>,
) -> Result<Json<ApiResponse<SessionView>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let name = body.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::Validation("Member name must not be empty".to_string()));
    }

    let sid = parse_uuid(&session_id)?;
    let mut session = state
        .sessions
        .get_mut(&sid)
        .ok_or_else(|| session_not_found(sid))?;
    session.add_board_member(name)?;
    let view = SessionView::from(&*session);

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(view, request_id, elapsed)))
}

/// DELETE /api/v1/sessions/{id}/board-members/{name} - Remove a board member.
pub async fn remove_board_member(
    State(state): State<AppState>,
    Path((session_id, name)): Path<(String, String)>,
) -> Result<Json<ApiResponse<SessionView>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;
    let mut session = state
        .sessions
        .get_mut(&sid)
        .ok_or_else(|| session_not_found(sid))?;
    if !session.remove_board_member(&name) {
        return Err(AppError::NotFound(format!("'{name}' is not on the board")));
    }
    let view = SessionView::from(&*session);

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(view, request_id, elapsed)))
}
