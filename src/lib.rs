// src/lib.rs
// Oracle presence service - persona-switching spoken answers

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod api;
pub mod config;
pub mod error;
pub mod llm;
pub mod persona;
pub mod pipeline;
pub mod state;
pub mod storage;

pub use error::{LogWriteWarning, OracleError, Result};
pub use state::AppState;
