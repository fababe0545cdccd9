//! Role × resource × operation rule table.

use std::fmt;

use serde::{Deserialize, Serialize};

use farmhub_core::types::{ResourceKind, Scope};

use crate::actor::Principal;

/// The five operations every resource supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Read a collection.
    List,
    /// Read one row.
    Retrieve,
    /// Insert.
    Create,
    /// Partial update.
    Update,
    /// Delete.
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::List => "list",
            Self::Retrieve => "retrieve",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        };
        write!(f, "{s}")
    }
}

/// Outcome of a rule lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Allowed within the given row scope.
    Allow(Scope),
    /// Denied outright, with the rule that was violated.
    Deny(&'static str),
}

const FARMS_READ_DENIED: &str = "You must be the assigned Agent for this farm.";
const FARMS_WRITE_DENIED: &str = "Not allowed to create or modify farms.";
const PROFILE_CREATE_DENIED: &str = "Not allowed to create farmer profiles.";
const PROFILE_DELETE_DENIED: &str = "Not allowed to delete farmer profiles.";
const USER_CREATE_DENIED: &str = "Not allowed to create users.";
const USER_DELETE_DENIED: &str = "Not allowed to delete users.";
const NO_ROLE_DENIED: &str = "Your account has no role permitting this operation.";

/// The rule table. Pure: depends only on the principal, the resource kind
/// and the operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct RbacPolicies;

impl RbacPolicies {
    /// Creates the default policy set.
    pub fn new() -> Self {
        Self
    }

    /// Look up the rule for a principal acting on a resource kind.
    pub fn decide(&self, principal: Principal, kind: ResourceKind, op: Operation) -> Decision {
        use Decision::{Allow, Deny};
        use Operation::*;
        use ResourceKind as K;

        match principal {
            Principal::PlatformAdmin => Allow(Scope::Unrestricted),

            Principal::Agent(agent) => match (kind, op) {
                (K::User, List | Retrieve | Create) => Allow(Scope::ManagedBy(agent)),
                (K::User, Update) => Allow(Scope::OwnedBy(agent)),
                (K::User, Delete) => Deny(USER_DELETE_DENIED),
                (K::Farm | K::FarmerProfile | K::Cow | K::Activity | K::MilkRecord, _) => {
                    Allow(Scope::ManagedBy(agent))
                }
            },

            Principal::Farmer(user) => match (kind, op) {
                (K::Farm, List | Retrieve) => Deny(FARMS_READ_DENIED),
                (K::Farm, Create | Update | Delete) => Deny(FARMS_WRITE_DENIED),
                (K::FarmerProfile, Create) => Deny(PROFILE_CREATE_DENIED),
                (K::FarmerProfile, Delete) => Deny(PROFILE_DELETE_DENIED),
                (K::User, Create) => Deny(USER_CREATE_DENIED),
                (K::User, Delete) => Deny(USER_DELETE_DENIED),
                (K::User | K::FarmerProfile | K::Cow | K::Activity | K::MilkRecord, _) => {
                    Allow(Scope::OwnedBy(user))
                }
            },

            Principal::Other => match op {
                Create => Deny(NO_ROLE_DENIED),
                List | Retrieve | Update | Delete => Allow(Scope::Nothing),
            },
        }
    }
}
