// src/config/env.rs
// Environment-based configuration - single source of truth for all env vars

use std::path::PathBuf;
use tracing::{debug, info};

use crate::error::{OracleError, Result};

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_CHAT_MODEL: &str = "gpt-4o";
const DEFAULT_TTS_MODEL: &str = "tts-1-hd";
const DEFAULT_AWS_REGION: &str = "us-east-2";
const DEFAULT_AUDIO_PREFIX: &str = "oracle-audio/";
const DEFAULT_LOG_PREFIX: &str = "oracle-logs/";

/// Chat + speech API settings
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    /// OPENAI_API_KEY
    pub api_key: Option<String>,
    /// OPENAI_BASE_URL
    pub base_url: String,
    /// ORACLE_CHAT_MODEL
    pub chat_model: String,
    /// ORACLE_TTS_MODEL
    pub tts_model: String,
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            tts_model: DEFAULT_TTS_MODEL.to_string(),
        }
    }
}

impl OpenAiSettings {
    /// The credential is checked here, where it is used, not at startup
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| OracleError::config("Missing required environment variable: OPENAI_API_KEY"))
    }
}

/// Object storage settings
#[derive(Debug, Clone)]
pub struct StorageSettings {
    /// AWS_REGION
    pub region: String,
    /// S3_BUCKET
    pub bucket: Option<String>,
    /// ORACLE_AUDIO_PREFIX
    pub audio_prefix: String,
    /// ORACLE_LOG_PREFIX
    pub log_prefix: String,
    /// ORACLE_SCRATCH_DIR
    pub scratch_dir: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            region: DEFAULT_AWS_REGION.to_string(),
            bucket: None,
            audio_prefix: DEFAULT_AUDIO_PREFIX.to_string(),
            log_prefix: DEFAULT_LOG_PREFIX.to_string(),
            scratch_dir: std::env::temp_dir(),
        }
    }
}

impl StorageSettings {
    pub fn require_bucket(&self) -> Result<&str> {
        self.bucket
            .as_deref()
            .ok_or_else(|| OracleError::config("Missing required environment variable: S3_BUCKET"))
    }
}

/// Environment configuration - all env vars in one place
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub openai: OpenAiSettings,
    pub storage: StorageSettings,
}

impl EnvConfig {
    /// Load all environment configuration (call once at startup)
    pub fn from_env() -> Self {
        info!("Loading environment configuration");
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let or = |key: &str, default: &str| read(key).unwrap_or_else(|| default.to_string());

        let openai = OpenAiSettings {
            api_key: read("OPENAI_API_KEY"),
            base_url: or("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
            chat_model: or("ORACLE_CHAT_MODEL", DEFAULT_CHAT_MODEL),
            tts_model: or("ORACLE_TTS_MODEL", DEFAULT_TTS_MODEL),
        };

        let storage = StorageSettings {
            region: or("AWS_REGION", DEFAULT_AWS_REGION),
            bucket: read("S3_BUCKET"),
            audio_prefix: or("ORACLE_AUDIO_PREFIX", DEFAULT_AUDIO_PREFIX),
            log_prefix: or("ORACLE_LOG_PREFIX", DEFAULT_LOG_PREFIX),
            scratch_dir: read("ORACLE_SCRATCH_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(std::env::temp_dir),
        };

        debug!(
            region = %storage.region,
            bucket = ?storage.bucket,
            chat_model = %openai.chat_model,
            tts_model = %openai.tts_model,
            "Environment configuration loaded"
        );

        Self { openai, storage }
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigValidation {
        let mut validation = ConfigValidation::new();

        if self.openai.api_key.is_none() {
            validation.add_error("OPENAI_API_KEY is not set. Chat and speech calls will fail.");
        }

        if self.storage.bucket.is_none() {
            validation.add_error("S3_BUCKET is not set. Audio uploads will fail.");
        }

        if self.openai.base_url != DEFAULT_OPENAI_BASE_URL {
            validation.add_warning(format!(
                "Using non-default OPENAI_BASE_URL '{}'",
                self.openai.base_url
            ));
        }

        if !self.storage.scratch_dir.is_dir() {
            validation.add_warning(format!(
                "Scratch directory {} does not exist",
                self.storage.scratch_dir.display()
            ));
        }

        validation
    }
}

/// Result of configuration validation
#[derive(Debug, Clone)]
pub struct ConfigValidation {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl Default for ConfigValidation {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigValidation {
    pub fn new() -> Self {
        Self {
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Format as a human-readable report
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        if !self.errors.is_empty() {
            lines.push("Errors:".to_string());
            for err in &self.errors {
                lines.push(format!("  - {}", err));
            }
        }

        if !self.warnings.is_empty() {
            lines.push("Warnings:".to_string());
            for warn in &self.warnings {
                lines.push(format!("  - {}", warn));
            }
        }

        if lines.is_empty() {
            "Configuration OK".to_string()
        } else {
            lines.join("\n")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EnvConfig::from_lookup(lookup(&[]));
        assert_eq!(config.storage.region, "us-east-2");
        assert_eq!(config.storage.audio_prefix, "oracle-audio/");
        assert_eq!(config.storage.log_prefix, "oracle-logs/");
        assert_eq!(config.openai.chat_model, "gpt-4o");
        assert_eq!(config.openai.tts_model, "tts-1-hd");
        assert!(config.storage.bucket.is_none());
        assert!(config.openai.api_key.is_none());
    }

    #[test]
    fn test_values_from_lookup() {
        let config = EnvConfig::from_lookup(lookup(&[
            ("S3_BUCKET", "oracle-bucket"),
            ("AWS_REGION", "eu-west-1"),
            ("OPENAI_API_KEY", "sk-test"),
            ("ORACLE_SCRATCH_DIR", "/var/tmp/oracle"),
        ]));
        assert_eq!(config.storage.require_bucket().unwrap(), "oracle-bucket");
        assert_eq!(config.storage.region, "eu-west-1");
        assert_eq!(config.openai.require_api_key().unwrap(), "sk-test");
        assert_eq!(config.storage.scratch_dir, PathBuf::from("/var/tmp/oracle"));
    }

    #[test]
    fn test_blank_values_count_as_missing() {
        let config = EnvConfig::from_lookup(lookup(&[("S3_BUCKET", "  "), ("OPENAI_API_KEY", "")]));
        assert!(matches!(config.storage.require_bucket(), Err(OracleError::Config(_))));
        assert!(matches!(config.openai.require_api_key(), Err(OracleError::Config(_))));
    }

    #[test]
    fn test_validation_missing_required() {
        let config = EnvConfig::from_lookup(lookup(&[]));
        let validation = config.validate();
        assert!(!validation.is_valid());
        assert_eq!(validation.errors.len(), 2);
        assert!(validation.report().contains("S3_BUCKET"));
    }

    #[test]
    fn test_validation_ok_report() {
        let validation = ConfigValidation::new();
        assert!(validation.is_valid());
        assert_eq!(validation.report(), "Configuration OK");
    }
}
