// src/pipeline/mod.rs
// Question -> answer -> speech -> storage -> presigned URL

pub mod scratch;

pub use scratch::ScratchAudio;

use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::StorageSettings;
use crate::error::{LogWriteWarning, OracleError, Result};
use crate::llm::{ChatModel, SpeechSynth};
use crate::persona::PersonaChoice;
use crate::storage::{
    AUDIO_CONTENT_TYPE, ObjectStore, PRESIGN_TTL, TRANSCRIPT_CONTENT_TYPE, audio_key,
    transcript_key,
};

/// Everything one successful request produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceReply {
    pub spoken: String,
    pub audio_url: String,
    pub audio_key: String,
    /// `None` when the best-effort transcript write failed
    pub transcript_key: Option<String>,
}

/// Sequential response pipeline. Each step needs the previous step's output,
/// so nothing runs in parallel and nothing is retried.
#[derive(Clone)]
pub struct ResponsePipeline {
    chat: Arc<dyn ChatModel>,
    speech: Arc<dyn SpeechSynth>,
    store: Arc<dyn ObjectStore>,
    settings: StorageSettings,
}

impl ResponsePipeline {
    pub fn new(
        chat: Arc<dyn ChatModel>,
        speech: Arc<dyn SpeechSynth>,
        store: Arc<dyn ObjectStore>,
        settings: StorageSettings,
    ) -> Self {
        Self {
            chat,
            speech,
            store,
            settings,
        }
    }

    pub fn settings(&self) -> &StorageSettings {
        &self.settings
    }

    /// Run the whole pipeline for one question under the chosen persona.
    pub async fn respond(&self, question: &str, choice: &PersonaChoice) -> Result<PresenceReply> {
        // Fail before spending any upstream call
        let bucket = self.settings.require_bucket()?;

        let answer = self
            .chat
            .complete(choice.system_prompt(), question)
            .await
            .inspect_err(|e| error!(error = %e, "OpenAI chat failed"))?;
        info!(persona = %choice.persona, answer = %answer, "Oracle answer");

        let audio = self.speech.synthesize(&answer, &choice.voice).await?;

        let audio_key = self.upload_audio(bucket, &audio).await?;

        let transcript_key = match self.log_transcript(bucket, &answer).await {
            Ok(key) => Some(key),
            Err(warning) => {
                warn!(error = %warning, "Transcript not logged");
                None
            }
        };

        let audio_url = self.presign(bucket, &audio_key).await?;

        Ok(PresenceReply {
            spoken: answer,
            audio_url,
            audio_key,
            transcript_key,
        })
    }

    /// Stage audio in a scratch file, upload it, confirm it landed.
    /// The scratch file is gone when this returns, success or not.
    async fn upload_audio(&self, bucket: &str, audio: &[u8]) -> Result<String> {
        let key = audio_key(&self.settings.audio_prefix);
        info!("Will upload to: s3://{}/{}", bucket, key);

        let scratch = ScratchAudio::write(&self.settings.scratch_dir, audio)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to write scratch audio");
                OracleError::StorageUpload(format!("scratch write failed: {e}"))
            })?;

        let outcome = self.put_and_verify(bucket, &key, scratch.path()).await;
        scratch.release();

        outcome.inspect_err(|e| error!(error = %e, "Upload or verification failed"))?;
        Ok(key)
    }

    async fn put_and_verify(&self, bucket: &str, key: &str, path: &Path) -> Result<()> {
        self.store
            .put_file(bucket, key, path, AUDIO_CONTENT_TYPE)
            .await
            .map_err(OracleError::StorageUpload)?;

        match self.store.exists(bucket, key).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(OracleError::StorageUpload(format!(
                "s3://{}/{} missing after upload",
                bucket, key
            ))),
            Err(e) => Err(OracleError::StorageUpload(format!("verification failed: {e}"))),
        }
    }

    /// Best-effort companion transcript. The caller may discard the warning.
    async fn log_transcript(
        &self,
        bucket: &str,
        text: &str,
    ) -> std::result::Result<String, LogWriteWarning> {
        let key = transcript_key(&self.settings.log_prefix);
        self.store
            .put_bytes(bucket, &key, text.as_bytes().to_vec(), TRANSCRIPT_CONTENT_TYPE)
            .await
            .map_err(LogWriteWarning)?;
        Ok(key)
    }

    async fn presign(&self, bucket: &str, key: &str) -> Result<String> {
        info!("Generating presigned URL for {}", key);
        let url = self
            .store
            .presign_get(bucket, key, PRESIGN_TTL)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to generate presigned URL");
                OracleError::Presign(e)
            })?;
        info!(url = %url, "Presigned URL issued");
        Ok(url)
    }
}
