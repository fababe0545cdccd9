//! Role-based access control: the static rule table and the engine that
//! applies it to concrete payloads and targets.

pub mod engine;
pub mod policies;

pub use engine::AuthorizationEngine;
pub use policies::{Decision, Operation, RbacPolicies};
