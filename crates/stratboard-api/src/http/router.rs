//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`.
//! Middleware: CORS, tracing.

use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Sessions
        .route("/sessions", post(handlers::session::create_session))
        .route("/sessions/{id}", get(handlers::session::get_session))
        .route("/sessions/{id}/new-chat", post(handlers::session::new_chat))
        .route("/sessions/{id}/language", put(handlers::session::set_language))
        .route(
            "/sessions/{id}/board-members",
            post(handlers::session::add_board_member),
        )
        .route(
            "/sessions/{id}/board-members/{name}",
            delete(handlers::session::remove_board_member),
        )
        // Chat turns
        .route("/sessions/{id}/messages", post(handlers::chat::post_message))
        // Admin (password-gated)
        .route("/admin/logs", get(handlers::admin::get_logs))
        .route("/admin/config", get(handlers::admin::get_config))
        .route(
            "/admin/board-members",
            put(handlers::admin::update_board_members),
        )
        .route(
            "/admin/system-prompts",
            put(handlers::admin::update_system_prompts),
        )
        .route(
            "/admin/translations",
            put(handlers::admin::update_translations),
        );

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint (no auth required).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
