//! User accounts and roles.

pub mod model;
pub mod role;

pub use model::{CreateUser, NewUser, UpdateUser, User, UserChanges, UserFilter};
pub use role::Role;
