//! Core type definitions used across the FarmHub workspace.

pub mod id;
pub mod resource;
pub mod scope;

pub use id::*;
pub use resource::ResourceKind;
pub use scope::{Predicate, Scope};
