// src/api/http/router.rs
// HTTP router composition

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use super::{handlers::health_handler, presence::presence_handler};
use crate::state::AppState;

/// Health, presence, the entry page and the static UI under /ui
pub fn http_router(app_state: Arc<AppState>) -> Router {
    let ui_dir = app_state.ui_dir.clone();

    Router::new()
        // Health
        .route("/health", get(health_handler))

        // Presence
        .route("/presence", post(presence_handler))

        // Static UI
        .route_service("/", ServeFile::new(ui_dir.join("index.html")))
        .nest_service("/ui", ServeDir::new(ui_dir))

        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
