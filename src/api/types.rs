// src/api/types.rs
use serde::{Deserialize, Serialize};

/// Used when a caller posts to /presence without a question
pub const DEFAULT_QUESTION: &str = "You dare summon the Oracle without a query?";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PresenceRequest {
    #[serde(default)]
    pub question: Option<String>,
}

impl PresenceRequest {
    pub fn question(&self) -> &str {
        self.question.as_deref().unwrap_or(DEFAULT_QUESTION)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceResponse {
    pub spoken: String,
    pub audio_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "oracle-awake".to_string(),
        }
    }
}
