//! # farmhub-api
//!
//! HTTP API layer for FarmHub built on Axum.
//!
//! Provides the REST endpoints for every resource, the bearer-token
//! extractor, request logging and CORS middleware, and the mapping from
//! [`AppError`](farmhub_core::AppError) to HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state};
pub use error::ApiError;
pub use state::AppState;
