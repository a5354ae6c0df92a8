// src/pipeline/scratch.rs
// Scratch copy of synthesized audio; removed on every exit path

use std::io;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{info, warn};

/// Local audio file that exists only while it is being uploaded.
///
/// `release` deletes it on the normal path. If the guard is dropped
/// early (error, panic, cancelled future), `NamedTempFile` deletes it instead.
/// Either way the file is removed exactly once.
#[derive(Debug)]
pub struct ScratchAudio {
    file: NamedTempFile,
}

impl ScratchAudio {
    /// Write `audio` to a fresh `audio_*.mp3` file under `dir`
    pub async fn write(dir: &Path, audio: &[u8]) -> io::Result<Self> {
        let file = tempfile::Builder::new()
            .prefix("audio_")
            .suffix(".mp3")
            .tempfile_in(dir)?;
        tokio::fs::write(file.path(), audio).await?;
        info!(path = %file.path().display(), bytes = audio.len(), "Wrote scratch audio");
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn release(self) {
        let path = self.file.path().to_path_buf();
        match self.file.close() {
            Ok(()) => info!(path = %path.display(), "Temp file cleaned up"),
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove temp file"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_and_release() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = ScratchAudio::write(dir.path(), b"ID3fake").await.unwrap();
        let path = scratch.path().to_path_buf();

        assert_eq!(std::fs::read(&path).unwrap(), b"ID3fake");
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("audio_") && name.ends_with(".mp3"));

        scratch.release();
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_drop_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = {
            let scratch = ScratchAudio::write(dir.path(), b"bytes").await.unwrap();
            scratch.path().to_path_buf()
        };
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_missing_dir_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone");
        assert!(ScratchAudio::write(&missing, b"x").await.is_err());
    }
}
