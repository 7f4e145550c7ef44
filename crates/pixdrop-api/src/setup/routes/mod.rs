//! Route configuration and setup.
//!
//! The upload router is mounted under `/media`; health and robots live at the root.

mod health;

use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub const MEDIA_PREFIX: &str = "/media";

/// Router for the upload endpoint, before it is mounted
pub fn media_routes(max_body_size_bytes: usize) -> Router<Arc<AppState>> {
    Router::new()
        .route("/upload", post(handlers::upload::upload))
        .layer(DefaultBodyLimit::max(max_body_size_bytes))
}

/// Setup all application routes
pub fn setup_routes(state: Arc<AppState>) -> Router {
    tracing::info!(
        max_body_size_bytes = state.config.max_body_size_bytes,
        robots_index = state.config.robots_index,
        "Setting up routes"
    );

    Router::new()
        .nest(
            MEDIA_PREFIX,
            media_routes(state.config.max_body_size_bytes),
        )
        .route("/healthz", get(health::health_check))
        .route("/robots.txt", get(health::robots_txt))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
