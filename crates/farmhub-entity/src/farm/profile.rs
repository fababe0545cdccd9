//! Farmer profile entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use farmhub_core::traits::Resource;
use farmhub_core::types::{FarmId, FarmerProfileId, ResourceKind, UserId};

/// Links a FARMER user to the single farm they work on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FarmerProfile {
    /// Unique profile identifier.
    pub id: FarmerProfileId,
    /// The farmer's user account; at most one profile per user.
    pub user_id: UserId,
    /// The farm the farmer belongs to.
    pub farm_id: FarmId,
}

impl Resource for FarmerProfile {
    type Id = FarmerProfileId;
    type New = NewFarmerProfile;
    type Changes = FarmerProfileChanges;
    type Filter = FarmerProfileFilter;

    const KIND: ResourceKind = ResourceKind::FarmerProfile;

    fn by_id(id: FarmerProfileId) -> FarmerProfileFilter {
        FarmerProfileFilter {
            id: Some(id),
            ..Default::default()
        }
    }
}

/// Request payload for creating a profile; missing fields are reported by
/// the service with field-specific messages.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateFarmerProfile {
    /// The farmer's user account.
    #[serde(default, alias = "user")]
    pub user_id: Option<UserId>,
    /// Target farm.
    #[serde(default, alias = "farm")]
    pub farm_id: Option<FarmId>,
}

/// Row data for inserting a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFarmerProfile {
    /// The farmer's user account.
    pub user_id: UserId,
    /// Target farm.
    pub farm_id: FarmId,
}

/// Partial update for a profile.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FarmerProfileChanges {
    /// New user account.
    #[serde(default, alias = "user")]
    pub user_id: Option<UserId>,
    /// New farm.
    #[serde(default, alias = "farm")]
    pub farm_id: Option<FarmId>,
}

/// Attribute filter for profile listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FarmerProfileFilter {
    /// Exact id.
    #[serde(skip)]
    pub id: Option<FarmerProfileId>,
    /// Only the profile of this user.
    #[serde(alias = "user")]
    pub user_id: Option<UserId>,
    /// Only profiles on this farm.
    #[serde(alias = "farm")]
    pub farm_id: Option<FarmId>,
}

impl FarmerProfileFilter {
    /// Whether a profile row satisfies the filter.
    pub fn matches(&self, profile: &FarmerProfile) -> bool {
        self.id.is_none_or(|id| profile.id == id)
            && self.user_id.is_none_or(|u| profile.user_id == u)
            && self.farm_id.is_none_or(|f| profile.farm_id == f)
    }
}
