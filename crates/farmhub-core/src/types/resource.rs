//! Closed set of resource kinds known to the authorization engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A resource collection exposed by FarmHub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// User accounts.
    User,
    /// Farms.
    Farm,
    /// Farmer profiles.
    FarmerProfile,
    /// Cows.
    Cow,
    /// Husbandry activities.
    Activity,
    /// Milk records.
    MilkRecord,
}

impl ResourceKind {
    /// Human-readable singular name used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Farm => "Farm",
            Self::FarmerProfile => "FarmerProfile",
            Self::Cow => "Cow",
            Self::Activity => "Activity",
            Self::MilkRecord => "MilkRecord",
        }
    }

    /// Standard message for a missing or out-of-scope target.
    pub fn not_found_message(&self) -> String {
        format!("{} not found.", self.label())
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Farm => write!(f, "farm"),
            Self::FarmerProfile => write!(f, "farmer_profile"),
            Self::Cow => write!(f, "cow"),
            Self::Activity => write!(f, "activity"),
            Self::MilkRecord => write!(f, "milk_record"),
        }
    }
}
