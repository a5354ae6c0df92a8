// src/error.rs
// Error taxonomy for the presence pipeline

use thiserror::Error;

/// Fatal errors. Any of these aborts the request; none are retried.
#[derive(Error, Debug)]
pub enum OracleError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("chat completion failed: {0}")]
    UpstreamChat(String),

    #[error("speech synthesis failed with status {status}: {body}")]
    UpstreamSpeech { status: u16, body: String },

    #[error("storage upload failed: {0}")]
    StorageUpload(String),

    #[error("presigned URL generation failed: {0}")]
    Presign(String),
}

/// Convenience type alias for Result using OracleError
pub type Result<T> = std::result::Result<T, OracleError>;

impl OracleError {
    /// Stable machine-readable code, also used as the API `error_code`
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::UpstreamChat(_) => "UPSTREAM_CHAT_ERROR",
            Self::UpstreamSpeech { .. } => "UPSTREAM_SPEECH_ERROR",
            Self::StorageUpload(_) => "STORAGE_UPLOAD_ERROR",
            Self::Presign(_) => "PRESIGN_ERROR",
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Non-fatal failure writing the companion transcript object.
/// Callers log it and move on.
#[derive(Error, Debug)]
#[error("failed to log message to storage: {0}")]
pub struct LogWriteWarning(pub String);
