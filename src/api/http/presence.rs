// src/api/http/presence.rs

use axum::{Json, extract::State};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::api::error::ApiResult;
use crate::api::types::{PresenceRequest, PresenceResponse};
use crate::state::AppState;

/// POST /presence - pick a persona, answer, speak, hand back the audio link
pub async fn presence_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<PresenceRequest>,
) -> ApiResult<Json<PresenceResponse>> {
    let question = request.question();
    info!(question = %question, "Question received");

    let choice = app_state.selector.choose(question, Utc::now());
    let reply = app_state.pipeline.respond(question, &choice).await?;

    Ok(Json(PresenceResponse {
        spoken: reply.spoken,
        audio_file: reply.audio_url,
    }))
}
