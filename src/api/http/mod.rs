// src/api/http/mod.rs

pub mod handlers;
pub mod presence;
pub mod router;

pub use handlers::health_handler;
pub use presence::presence_handler;
