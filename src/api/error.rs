// src/api/error.rs
// Maps pipeline failures onto structured HTTP error responses

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use tracing::error;

use crate::error::OracleError;

/// Standard API error response format
#[derive(Debug)]
pub struct ApiError {
    pub message: String,
    pub status_code: StatusCode,
    pub error_code: Option<String>,
}

impl ApiError {
    /// Create a new internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
            error_code: Some("INTERNAL_ERROR".to_string()),
        }
    }

    /// Create a new bad gateway error (an upstream service misbehaved)
    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: StatusCode::BAD_GATEWAY,
            error_code: Some("BAD_GATEWAY".to_string()),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.error_code = Some(code.into());
        self
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response_json = json!({
            "error": true,
            "message": self.message,
            "status": self.status_code.as_u16()
        });

        if let Some(error_code) = self.error_code {
            response_json["error_code"] = json!(error_code);
        }

        (self.status_code, Json(response_json)).into_response()
    }
}

/// Upstream detail stays in the server log; the client gets a generic message.
impl From<OracleError> for ApiError {
    fn from(err: OracleError) -> Self {
        error!(code = err.code(), error = %err, "Presence request failed");

        let api_error = match &err {
            OracleError::Config(_) => ApiError::internal("The Oracle is misconfigured"),
            OracleError::UpstreamChat(_) => ApiError::bad_gateway("The Oracle could not think"),
            OracleError::UpstreamSpeech { .. } => ApiError::bad_gateway("The Oracle lost its voice"),
            OracleError::StorageUpload(_) => ApiError::internal("The Oracle could not store its answer"),
            OracleError::Presign(_) => ApiError::internal("The Oracle could not share its answer"),
        };
        api_error.with_code(err.code())
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;
