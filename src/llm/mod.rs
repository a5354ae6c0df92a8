// src/llm/mod.rs
// Chat-completion and speech-synthesis seams

pub mod client;

pub use client::OpenAIClient;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;

/// Answers a question under a given system prompt
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Returns the first choice's message text.
    async fn complete(&self, system_prompt: &str, question: &str) -> Result<String>;
}

/// Turns answer text into MP3 audio
#[async_trait]
pub trait SpeechSynth: Send + Sync {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Bytes>;
}
