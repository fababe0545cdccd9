//! Custom Axum extractors.
//!
//! The wrappers around axum's own extractors reject with the same
//! `{"error", "message"}` body as service errors.

pub mod auth;
pub mod json;
pub mod path;
pub mod query;

pub use auth::AuthUser;
pub use json::ApiJson;
pub use path::ApiPath;
pub use query::ApiQuery;
