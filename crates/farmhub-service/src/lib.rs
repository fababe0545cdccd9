//! # farmhub-service
//!
//! Business logic service layer for FarmHub. Each service wraps the CRUD
//! operations of one resource and runs every call through the
//! [`AuthorizationEngine`](farmhub_auth::AuthorizationEngine) before any
//! read or write reaches the data store.
//!
//! Services follow constructor injection: the engine (which owns the
//! repositories) is provided at construction time via `Arc`.

pub mod context;
pub mod farm;
pub mod livestock;
pub mod production;
pub mod seed;
pub mod user;

#[cfg(test)]
mod testing;

pub use context::RequestContext;
pub use farm::{FarmService, FarmerProfileService};
pub use livestock::{ActivityService, CowService};
pub use production::MilkRecordService;
pub use seed::seed;
pub use user::UserService;
