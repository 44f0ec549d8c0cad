//! Axum HTTP API server.
//!
//! This crate provides:
//! - The `POST /analyze` video assessment endpoint
//! - A Portuguese landing page for driving the API from a browser
//! - Health probe, CORS, request-ID and request-logging middleware

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
