// src/storage/mod.rs
// Object storage seam: audio upload, existence probe, transcript logs, presigned URLs

pub mod s3;

pub use s3::S3Store;

use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use uuid::Uuid;

/// Pre-signed audio links stay valid for a day
pub const PRESIGN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

pub const AUDIO_CONTENT_TYPE: &str = "audio/mpeg";
pub const TRANSCRIPT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Minimal object store surface the pipeline needs.
///
/// Errors are plain strings; the pipeline maps them onto its taxonomy
/// depending on which step failed.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload a local file
    async fn put_file(
        &self,
        bucket: &str,
        key: &str,
        path: &Path,
        content_type: &str,
    ) -> Result<(), String>;

    /// Upload an in-memory body
    async fn put_bytes(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), String>;

    /// Existence probe (HEAD)
    async fn exists(&self, bucket: &str, key: &str) -> Result<bool, String>;

    /// Credential-free GET link valid for `ttl`
    async fn presign_get(&self, bucket: &str, key: &str, ttl: Duration) -> Result<String, String>;
}

/// Empty stays empty, anything else ends in exactly one '/'
pub fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{}/", trimmed)
    }
}

/// Fresh key for an uploaded answer: `<prefix>audio_<uuid>.mp3`
pub fn audio_key(prefix: &str) -> String {
    format!("{}audio_{}.mp3", normalize_prefix(prefix), Uuid::new_v4())
}

/// Fresh key for a companion transcript: `<prefix>message_<uuid>.txt`
pub fn transcript_key(prefix: &str) -> String {
    format!("{}message_{}.txt", normalize_prefix(prefix), Uuid::new_v4())
}
