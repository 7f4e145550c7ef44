//! Liveness and crawler endpoints

use crate::state::AppState;
use axum::{extract::State, http::header, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

/// Liveness probe - process is running
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "OK" })))
}

/// Disallow everything unless indexing was enabled
pub async fn robots_txt(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let pattern = if state.config.robots_index { "" } else { " /" };
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        format!("User-agent: *\nDisallow:{}\n", pattern),
    )
}
