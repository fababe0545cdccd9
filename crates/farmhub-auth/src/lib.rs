//! # farmhub-auth
//!
//! Authentication and authorization for FarmHub.
//!
//! ## Modules
//!
//! - `actor` — the authenticated identity snapshot and role classification
//! - `rbac` — the rule table and the authorization engine that scopes
//!   queries and forces ownership fields
//! - `jwt` — bearer token encoding and validation
//! - `password` — Argon2id hashing and length policy
//! - `resolver` — turns a bearer token into an [`Actor`]

pub mod actor;
pub mod jwt;
pub mod password;
pub mod rbac;
pub mod resolver;

pub use actor::{Actor, Principal};
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
pub use rbac::{AuthorizationEngine, Decision, Operation, RbacPolicies};
pub use resolver::ActorResolver;
