//! Core traits defined in `farmhub-core` and implemented by other crates.

pub mod repository;

pub use repository::{Repository, Resource};
