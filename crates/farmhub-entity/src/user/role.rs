//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three business roles. Exactly one per user.
///
/// Platform-admin status (`is_superuser`/`is_staff`) is carried separately
/// on the user and overrides the role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Platform operator.
    Superadmin,
    /// Field agent managing one or more farms.
    Agent,
    /// Farmer attached to a single farm through a profile.
    #[default]
    Farmer,
}

impl Role {
    /// Return the role as its stored uppercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Superadmin => "SUPERADMIN",
            Self::Agent => "AGENT",
            Self::Farmer => "FARMER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = farmhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SUPERADMIN" => Ok(Self::Superadmin),
            "AGENT" => Ok(Self::Agent),
            "FARMER" => Ok(Self::Farmer),
            _ => Err(farmhub_core::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: SUPERADMIN, AGENT, FARMER"
            ))),
        }
    }
}
