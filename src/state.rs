// src/state.rs
// Shared application state handed to every handler

use std::path::PathBuf;
use std::sync::Arc;

use crate::{
    config::{EnvConfig, PersonaConfig},
    llm::OpenAIClient,
    persona::PersonaSelector,
    pipeline::ResponsePipeline,
    storage::S3Store,
};

pub struct AppState {
    // -------- Persona --------
    pub selector: PersonaSelector,

    // -------- Services --------
    pub pipeline: ResponsePipeline,

    // -------- Static UI --------
    pub ui_dir: PathBuf,
}

impl AppState {
    pub fn new(selector: PersonaSelector, pipeline: ResponsePipeline, ui_dir: PathBuf) -> Self {
        Self {
            selector,
            pipeline,
            ui_dir,
        }
    }
}

/// Wire up the production collaborators: one OpenAI client for chat and
/// speech, S3 for storage.
pub async fn create_app_state(
    persona: PersonaConfig,
    env: EnvConfig,
    ui_dir: PathBuf,
) -> Arc<AppState> {
    let openai = Arc::new(OpenAIClient::new(env.openai.clone()));
    let store = Arc::new(S3Store::connect(&env.storage.region).await);

    let pipeline = ResponsePipeline::new(openai.clone(), openai, store, env.storage);

    Arc::new(AppState::new(PersonaSelector::new(persona), pipeline, ui_dir))
}
