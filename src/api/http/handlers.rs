// src/api/http/handlers.rs

use axum::{Json, response::IntoResponse};

use crate::api::types::HealthResponse;

/// Health check handler
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}
