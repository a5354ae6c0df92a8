// src/api/mod.rs
// HTTP API: router, handlers, wire types, error mapping

pub mod error;
pub mod http;
pub mod types;

pub use error::{ApiError, ApiResult};
pub use http::router::http_router;
pub use types::*;
