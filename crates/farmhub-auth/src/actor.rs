//! The authenticated identity handed to every service call.

use serde::{Deserialize, Serialize};

use farmhub_core::types::UserId;
use farmhub_entity::user::{Role, User};

/// Snapshot of the caller taken when the request is authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The caller's user id.
    pub user_id: UserId,
    /// Platform superuser flag.
    pub is_superuser: bool,
    /// Platform staff flag.
    pub is_staff: bool,
    /// Business role; `None` for identities without a recognised role.
    pub role: Option<Role>,
}

/// The closed set of rule families an actor is judged by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Principal {
    /// Superuser, staff, or SUPERADMIN: every rule is bypassed.
    PlatformAdmin,
    /// AGENT, scoped to the farms it manages.
    Agent(UserId),
    /// FARMER, scoped to its own profile.
    Farmer(UserId),
    /// Anything else: sees nothing, creates nothing.
    Other,
}

impl Actor {
    /// Snapshot a user row.
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            is_superuser: user.is_superuser,
            is_staff: user.is_staff,
            role: Some(user.role),
        }
    }

    /// True if any platform-level override applies.
    pub fn is_platform_admin(&self) -> bool {
        self.is_superuser || self.is_staff || self.role == Some(Role::Superadmin)
    }

    /// The business role, if recognised.
    pub fn role_of(&self) -> Option<Role> {
        self.role
    }

    /// Classify the actor. Platform-admin status is checked first and wins
    /// over any role.
    pub fn principal(&self) -> Principal {
        if self.is_platform_admin() {
            return Principal::PlatformAdmin;
        }
        match self.role_of() {
            Some(Role::Agent) => Principal::Agent(self.user_id),
            Some(Role::Farmer) => Principal::Farmer(self.user_id),
            Some(Role::Superadmin) | None => Principal::Other,
        }
    }
}
