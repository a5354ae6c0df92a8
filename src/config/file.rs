// src/config/file.rs
// Persona configuration loaded once from config.json

use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::error::{OracleError, Result};

const DEFAULT_CLARITY_DURATION_SEC: u64 = 120;
const DEFAULT_CLARITY_VOICE: &str = "en-GB-SoniaNeural";
const DEFAULT_FANCY_VOICE: &str = "echo";

/// Persona switching settings. Immutable after load.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PersonaConfig {
    /// Case-insensitive trigger for clarity mode
    #[serde(default)]
    pub sacred_phrase: String,
    #[serde(default = "default_clarity_duration")]
    pub clarity_duration_sec: u64,
    /// Voice used while clarity mode is active
    #[serde(default = "default_clarity_voice")]
    pub tts_voice: String,
    /// Voice used by the sarcastic default persona
    #[serde(default = "default_fancy_voice")]
    pub fancy_voice: String,
}

fn default_clarity_duration() -> u64 {
    DEFAULT_CLARITY_DURATION_SEC
}

fn default_clarity_voice() -> String {
    DEFAULT_CLARITY_VOICE.to_string()
}

fn default_fancy_voice() -> String {
    DEFAULT_FANCY_VOICE.to_string()
}

impl PersonaConfig {
    /// Load and validate the persona file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            OracleError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config = Self::from_json(&contents)
            .map_err(|e| OracleError::config(format!("{}: {}", path.display(), e)))?;
        debug!(path = %path.display(), "Loaded persona config");
        Ok(config)
    }

    /// Parse and validate persona settings from JSON text
    pub fn from_json(contents: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(contents)
            .map_err(|e| OracleError::config(format!("invalid persona config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// An empty phrase would match every question and pin clarity mode on.
    pub fn validate(&self) -> Result<()> {
        if self.sacred_phrase.trim().is_empty() {
            return Err(OracleError::config(
                "sacred_phrase must be a non-empty string",
            ));
        }
        Ok(())
    }

    /// Trigger phrase, lower-cased for matching
    pub fn normalized_phrase(&self) -> String {
        self.sacred_phrase.to_lowercase()
    }
}
