//! # farmhub-core
//!
//! Core crate for FarmHub. Contains configuration schemas, typed
//! identifiers, the access-scope vocabulary shared by the authorization
//! engine and the data stores, the generic repository contract, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other FarmHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
