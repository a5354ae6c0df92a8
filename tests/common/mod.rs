// tests/common/mod.rs
// In-process fakes for the chat, speech and storage seams

#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use oracle::config::{PersonaConfig, StorageSettings};
use oracle::llm::{ChatModel, SpeechSynth};
use oracle::pipeline::ResponsePipeline;
use oracle::storage::ObjectStore;
use oracle::{OracleError, Result};

pub const TEST_BUCKET: &str = "oracle-test-bucket";
pub const FAKE_AUDIO: &[u8] = b"ID3\x03fake-mp3-frames";

pub fn persona_config() -> PersonaConfig {
    PersonaConfig::from_json(
        r#"{"sacred_phrase":"clarity now","clarity_duration_sec":60,"tts_voice":"v1","fancy_voice":"v2"}"#,
    )
    .expect("valid persona config")
}

pub fn storage_settings(scratch_dir: &Path, bucket: Option<&str>) -> StorageSettings {
    StorageSettings {
        bucket: bucket.map(str::to_string),
        scratch_dir: scratch_dir.to_path_buf(),
        ..StorageSettings::default()
    }
}

// ── Chat ──────────────────────────────────────────────

pub struct FakeChat {
    pub answer: std::result::Result<String, String>,
    pub calls: AtomicUsize,
    pub seen: Mutex<Vec<(String, String)>>,
}

impl FakeChat {
    pub fn answering(answer: &str) -> Arc<Self> {
        Arc::new(Self {
            answer: Ok(answer.to_string()),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(msg: &str) -> Arc<Self> {
        Arc::new(Self {
            answer: Err(msg.to_string()),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_call(&self) -> Option<(String, String)> {
        self.seen.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ChatModel for FakeChat {
    async fn complete(&self, system_prompt: &str, question: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), question.to_string()));
        self.answer.clone().map_err(OracleError::UpstreamChat)
    }
}

// ── Speech ────────────────────────────────────────────

pub struct FakeSpeech {
    pub failure: Option<(u16, String)>,
    pub calls: AtomicUsize,
    pub voices: Mutex<Vec<String>>,
}

impl FakeSpeech {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self {
            failure: None,
            calls: AtomicUsize::new(0),
            voices: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            failure: Some((status, body.to_string())),
            calls: AtomicUsize::new(0),
            voices: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn voices(&self) -> Vec<String> {
        self.voices.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechSynth for FakeSpeech {
    async fn synthesize(&self, _text: &str, voice: &str) -> Result<Bytes> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.voices.lock().unwrap().push(voice.to_string());
        match &self.failure {
            Some((status, body)) => Err(OracleError::UpstreamSpeech {
                status: *status,
                body: body.clone(),
            }),
            None => Ok(Bytes::from_static(FAKE_AUDIO)),
        }
    }
}

// ── Storage ───────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub bucket: String,
    pub body: Vec<u8>,
    pub content_type: String,
}

/// Which store operation should misbehave
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreFaults {
    pub put_file: bool,
    pub put_bytes: bool,
    /// HEAD reports the object as missing
    pub vanish: bool,
    /// HEAD itself errors
    pub head: bool,
    pub presign: bool,
}

#[derive(Default)]
pub struct MemoryStore {
    pub faults: StoreFaults,
    pub objects: Mutex<HashMap<String, StoredObject>>,
    /// Local paths handed to put_file, for cleanup assertions
    pub uploaded_from: Mutex<Vec<PathBuf>>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_faults(faults: StoreFaults) -> Arc<Self> {
        Arc::new(Self {
            faults,
            ..Self::default()
        })
    }

    pub fn object(&self, key: &str) -> Option<StoredObject> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }

    pub fn uploaded_from(&self) -> Vec<PathBuf> {
        self.uploaded_from.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put_file(
        &self,
        bucket: &str,
        key: &str,
        path: &Path,
        content_type: &str,
    ) -> std::result::Result<(), String> {
        self.uploaded_from.lock().unwrap().push(path.to_path_buf());
        let body = std::fs::read(path).map_err(|e| e.to_string())?;
        if self.faults.put_file {
            return Err("AccessDenied: put_object".to_string());
        }
        self.objects.lock().unwrap().insert(
            key.to_string(),
            StoredObject {
                bucket: bucket.to_string(),
                body,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn put_bytes(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> std::result::Result<(), String> {
        if self.faults.put_bytes {
            return Err("SlowDown: put_object".to_string());
        }
        self.objects.lock().unwrap().insert(
            key.to_string(),
            StoredObject {
                bucket: bucket.to_string(),
                body,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn exists(&self, _bucket: &str, key: &str) -> std::result::Result<bool, String> {
        if self.faults.head {
            return Err("InternalError: head_object".to_string());
        }
        if self.faults.vanish {
            return Ok(false);
        }
        Ok(self.objects.lock().unwrap().contains_key(key))
    }

    async fn presign_get(
        &self,
        bucket: &str,
        key: &str,
        ttl: Duration,
    ) -> std::result::Result<String, String> {
        if self.faults.presign {
            return Err("credentials expired".to_string());
        }
        Ok(format!(
            "https://{}.s3.amazonaws.com/{}?X-Amz-Expires={}",
            bucket,
            key,
            ttl.as_secs()
        ))
    }
}

pub fn pipeline(
    chat: Arc<FakeChat>,
    speech: Arc<FakeSpeech>,
    store: Arc<MemoryStore>,
    settings: StorageSettings,
) -> ResponsePipeline {
    ResponsePipeline::new(chat, speech, store, settings)
}

/// Number of entries left in a scratch directory
pub fn scratch_entries(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
}
