//! Row-visibility scopes produced by the authorization engine.
//!
//! A [`Scope`] names *whose* rows an actor may touch; each data store
//! translates it into the ownership chain of the resource being queried
//! (for a milk record, `cow -> farm -> agent` or `cow -> owner -> user`).

use serde::{Deserialize, Serialize};

use super::id::UserId;

/// Visibility restriction attached to a read or write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "user_id", rename_all = "snake_case")]
pub enum Scope {
    /// Every row is visible.
    Unrestricted,
    /// Rows under a farm whose agent is the given user.
    ManagedBy(UserId),
    /// Rows belonging to the given user's own farmer profile (or, for
    /// users, the user row itself).
    OwnedBy(UserId),
    /// No row is visible.
    Nothing,
}

/// A scope combined with a resource-specific attribute filter.
///
/// The filter is applied *after* the scope, so it can only narrow what the
/// actor is already allowed to see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate<F> {
    /// Ownership restriction.
    pub scope: Scope,
    /// Attribute filter.
    pub filter: F,
}

impl<F: Default> Predicate<F> {
    /// A predicate with the given scope and no attribute filter.
    pub fn scoped(scope: Scope) -> Self {
        Self {
            scope,
            filter: F::default(),
        }
    }
}

impl<F> Predicate<F> {
    /// A predicate with the given scope and filter.
    pub fn new(scope: Scope, filter: F) -> Self {
        Self { scope, filter }
    }
}
