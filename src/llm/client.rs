// src/llm/client.rs
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, Method, RequestBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::{ChatModel, SpeechSynth};
use crate::config::OpenAiSettings;
use crate::error::{OracleError, Result};

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    voice: &'a str,
    input: &'a str,
}

/// OpenAI-compatible REST client for chat completions and speech
#[derive(Clone)]
pub struct OpenAIClient {
    client: Client,
    settings: OpenAiSettings,
}

impl OpenAIClient {
    pub fn new(settings: OpenAiSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &OpenAiSettings {
        &self.settings
    }

    /// Universal request builder for all JSON endpoints.
    /// Fails with a config error when no API key is configured.
    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let api_key = self.settings.require_api_key()?;
        Ok(self
            .client
            .request(method, endpoint_url(&self.settings.base_url, path))
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json"))
    }
}

fn endpoint_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Pull the first choice's text out of a chat completion body
fn first_choice_text(body: &str) -> Result<String> {
    let parsed: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| OracleError::UpstreamChat(format!("unparseable response: {e}")))?;

    parsed
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content.unwrap_or_default())
        .ok_or_else(|| OracleError::UpstreamChat("response contained no choices".to_string()))
}

#[async_trait]
impl ChatModel for OpenAIClient {
    async fn complete(&self, system_prompt: &str, question: &str) -> Result<String> {
        let payload = ChatCompletionRequest {
            model: &self.settings.chat_model,
            messages: vec![
                ChatMessage { role: "system", content: system_prompt },
                ChatMessage { role: "user", content: question },
            ],
        };

        let response = self
            .request(Method::POST, "chat/completions")?
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "OpenAI chat request failed");
                OracleError::UpstreamChat(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| OracleError::UpstreamChat(format!("failed to read response: {e}")))?;

        if !status.is_success() {
            error!(status = %status, body = %body, "OpenAI chat failed");
            return Err(OracleError::UpstreamChat(format!("API error {}: {}", status, body)));
        }

        let answer = first_choice_text(&body)?;
        debug!(model = %self.settings.chat_model, chars = answer.len(), "Chat completion received");
        Ok(answer)
    }
}

#[async_trait]
impl SpeechSynth for OpenAIClient {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Bytes> {
        let payload = SpeechRequest {
            model: &self.settings.tts_model,
            voice,
            input: text,
        };

        let response = self
            .request(Method::POST, "audio/speech")?
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "TTS request failed");
                OracleError::UpstreamSpeech {
                    status: 0,
                    body: e.to_string(),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            error!(status = %status, response_text = %body, "TTS request failed");
            return Err(OracleError::UpstreamSpeech {
                status: status.as_u16(),
                body,
            });
        }

        let audio = response.bytes().await.map_err(|e| OracleError::UpstreamSpeech {
            status: status.as_u16(),
            body: format!("failed to read audio body: {e}"),
        })?;
        debug!(voice = %voice, bytes = audio.len(), "Speech synthesized");
        Ok(audio)
    }
}
