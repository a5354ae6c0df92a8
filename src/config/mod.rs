// src/config/mod.rs
// Configuration: persona file + environment settings

pub mod env;
pub mod file;

pub use env::{ConfigValidation, EnvConfig, OpenAiSettings, StorageSettings};
pub use file::PersonaConfig;
