//! Administrative HTTP handlers, all gated by [`AdminAuth`].
//!
//! Endpoints:
//! - GET /api/v1/admin/logs           - Conversation logs, newest first
//! - GET /api/v1/admin/config         - Current config (or defaults)
//! - PUT /api/v1/admin/board-members  - Replace the default member list
//! - PUT /api/v1/admin/system-prompts - Replace the prompt templates
//! - PUT /api/v1/admin/translations   - Replace the translation tables
//!
//! Store write failures are not HTTP errors: the handler reports
//! `updated: false` and the details stay in the logs, matching how the
//! services degrade everywhere else.

use std::collections::HashMap;
use std::time::Instant;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use stratboard_types::chat::ConversationLog;
use stratboard_types::config::{Language, MEMBERS_PLACEHOLDER};

use crate::http::error::AppError;
use crate::http::extractors::auth::AdminAuth;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for the board member replacement.
#[derive(Debug, Deserialize)]
pub struct UpdateBoardMembersRequest {
    pub board_members: Vec<String>,
}

/// Request body for the system prompt replacement.
#[derive(Debug, Deserialize)]
pub struct UpdateSystemPromptsRequest {
    pub system_prompts: HashMap<Language, String>,
}

/// Request body for the translation replacement.
#[derive(Debug, Deserialize)]
pub struct UpdateTranslationsRequest {
    pub translations: HashMap<Language, HashMap<String, String>>,
}

/// Response payload for config writes.
#[derive(Debug, Serialize)]
pub struct UpdateView {
    pub updated: bool,
}

/// GET /api/v1/admin/logs - Conversation logs, newest first, max 100.
pub async fn get_logs(
    State(state): State<AppState>,
    _auth: AdminAuth,
) -> Result<Json<ApiResponse<Vec<ConversationLog>>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let logs = state.log_service.get_conversation_logs().await;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(logs, request_id, elapsed)))
}

/// GET /api/v1/admin/config - Current config, with store availability.
pub async fn get_config(
    State(state): State<AppState>,
    _auth: AdminAuth,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let stored = state.config_service.get_or_init().await;
    let store_available = stored.is_some();
    let config = stored.unwrap_or_default();

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        json!({
            "config": config,
            "store_available": store_available,
        }),
        request_id,
        elapsed,
    )))
}

/// PUT /api/v1/admin/board-members - Replace the default member list.
pub async fn update_board_members(
    State(state): State<AppState>,
    _auth: AdminAuth,
    Json(body): Json<UpdateBoardMembersRequest>,
) -> Result<Json<ApiResponse<UpdateView>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let updated = state
        .config_service
        .update_board_members(&body.board_members)
        .await;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(UpdateView { updated }, request_id, elapsed)))
}

/// PUT /api/v1/admin/system-prompts - Replace the prompt templates.
///
/// Every supported language must have a template containing the
/// `{members}` placeholder; the config invariant lives here, at the edit
/// surface, not in the store.
pub async fn update_system_prompts(
    State(state): State<AppState>,
    _auth: AdminAuth,
    Json(body): Json<UpdateSystemPromptsRequest>,
) -> Result<Json<ApiResponse<UpdateView>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    for language in Language::ALL {
        let template = body.system_prompts.get(&language).ok_or_else(|| {
            AppError::Validation(format!("Missing system prompt for {language}"))
        })?;
        if !template.contains(MEMBERS_PLACEHOLDER) {
            return Err(AppError::Validation(format!(
                "System prompt for {language} must contain the {MEMBERS_PLACEHOLDER} placeholder"
            )));
        }
    }

    let updated = state
        .config_service
        .update_system_prompts(&body.system_prompts)
        .await;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(UpdateView { updated }, request_id, elapsed)))
}

/// PUT /api/v1/admin/translations - Replace the translation tables.
pub async fn update_translations(
    State(state): State<AppState>,
    _auth: AdminAuth,
    Json(body): Json<UpdateTranslationsRequest>,
) -> Result<Json<ApiResponse<UpdateView>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    for language in Language::ALL {
        if !body.translations.contains_key(&language) {
            return Err(AppError::Validation(format!(
                "Missing translations for {language}"
            )));
        }
    }

    let updated = state
        .config_service
        .update_translations(&body.translations)
        .await;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(UpdateView { updated }, request_id, elapsed)))
}
