//! Cow entity model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use farmhub_core::traits::Resource;
use farmhub_core::types::{CowId, FarmId, FarmerProfileId, ResourceKind};

use crate::serde_util::{double_option, trimmed, trimmed_option};
use crate::validation::not_blank;

/// A cow kept on a farm and owned by one farmer profile on that farm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Cow {
    /// Unique cow identifier.
    pub id: CowId,
    /// Ear tag, unique within the farm.
    pub tag: String,
    /// Breed name.
    pub breed: String,
    /// Date of birth, when known.
    pub dob: Option<NaiveDate>,
    /// The farm the cow is kept on.
    pub farm_id: FarmId,
    /// The owning farmer profile.
    pub owner_id: FarmerProfileId,
}

impl Resource for Cow {
    type Id = CowId;
    type New = NewCow;
    type Changes = CowChanges;
    type Filter = CowFilter;

    const KIND: ResourceKind = ResourceKind::Cow;

    fn by_id(id: CowId) -> CowFilter {
        CowFilter {
            id: Some(id),
            ..Default::default()
        }
    }
}

/// Request payload for creating a cow. Farm and owner are optional here
/// because a farmer's are forced to their own profile.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCow {
    /// Ear tag.
    #[serde(deserialize_with = "trimmed")]
    #[validate(
        length(min = 1, max = 50, message = "must be between 1 and 50 characters"),
        custom(function = "not_blank")
    )]
    pub tag: String,
    /// Breed name.
    #[serde(deserialize_with = "trimmed")]
    #[validate(
        length(min = 1, max = 100, message = "must be between 1 and 100 characters"),
        custom(function = "not_blank")
    )]
    pub breed: String,
    /// Date of birth.
    #[serde(default)]
    pub dob: Option<NaiveDate>,
    /// Target farm.
    #[serde(default, alias = "farm")]
    pub farm_id: Option<FarmId>,
    /// Owning farmer profile.
    #[serde(default, alias = "owner")]
    pub owner_id: Option<FarmerProfileId>,
}

/// Row data for inserting a cow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCow {
    /// Ear tag.
    pub tag: String,
    /// Breed name.
    pub breed: String,
    /// Date of birth.
    pub dob: Option<NaiveDate>,
    /// Farm.
    pub farm_id: FarmId,
    /// Owner.
    pub owner_id: FarmerProfileId,
}

/// Partial update for a cow.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CowChanges {
    /// New ear tag.
    #[serde(default, deserialize_with = "trimmed_option")]
    #[validate(
        length(min = 1, max = 50, message = "must be between 1 and 50 characters"),
        custom(function = "not_blank")
    )]
    pub tag: Option<String>,
    /// New breed.
    #[serde(default, deserialize_with = "trimmed_option")]
    #[validate(
        length(min = 1, max = 100, message = "must be between 1 and 100 characters"),
        custom(function = "not_blank")
    )]
    pub breed: Option<String>,
    /// `Some(None)` clears the date of birth.
    #[serde(default, deserialize_with = "double_option")]
    pub dob: Option<Option<NaiveDate>>,
    /// Move to another farm.
    #[serde(default, alias = "farm")]
    pub farm_id: Option<FarmId>,
    /// Transfer to another owner.
    #[serde(default, alias = "owner")]
    pub owner_id: Option<FarmerProfileId>,
}

/// Attribute filter for cow listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CowFilter {
    /// Exact id.
    #[serde(skip)]
    pub id: Option<CowId>,
    /// Only cows on this farm.
    #[serde(alias = "farm")]
    pub farm_id: Option<FarmId>,
    /// Only cows of this owner.
    #[serde(alias = "owner")]
    pub owner_id: Option<FarmerProfileId>,
}

impl CowFilter {
    /// Whether a cow row satisfies the filter.
    pub fn matches(&self, cow: &Cow) -> bool {
        self.id.is_none_or(|id| cow.id == id)
            && self.farm_id.is_none_or(|f| cow.farm_id == f)
            && self.owner_id.is_none_or(|o| cow.owner_id == o)
    }
}
