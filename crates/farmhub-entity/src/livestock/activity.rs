//! Husbandry activity entity model.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use farmhub_core::traits::Resource;
use farmhub_core::types::{ActivityId, CowId, ResourceKind};

/// Kind of husbandry event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "activity_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    /// Vaccination.
    Vaccination,
    /// Calving.
    Birth,
    /// Health check or treatment.
    Health,
    /// Anything else.
    Other,
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Vaccination => "vaccination",
            Self::Birth => "birth",
            Self::Health => "health",
            Self::Other => "other",
        };
        write!(f, "{s}")
    }
}

/// A dated husbandry event recorded against a cow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Activity {
    /// Unique activity identifier.
    pub id: ActivityId,
    /// The cow concerned.
    pub cow_id: CowId,
    /// Event kind.
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub activity_type: ActivityType,
    /// Free-text notes; may be empty.
    pub notes: String,
    /// When it happened.
    pub date: NaiveDate,
}

impl Resource for Activity {
    type Id = ActivityId;
    type New = NewActivity;
    type Changes = ActivityChanges;
    type Filter = ActivityFilter;

    const KIND: ResourceKind = ResourceKind::Activity;

    fn by_id(id: ActivityId) -> ActivityFilter {
        ActivityFilter {
            id: Some(id),
            ..Default::default()
        }
    }
}

/// Data required to record an activity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewActivity {
    /// The cow concerned.
    #[serde(alias = "cow")]
    pub cow_id: CowId,
    /// Event kind.
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    /// Free-text notes.
    #[serde(default)]
    pub notes: String,
    /// When it happened.
    pub date: NaiveDate,
}

/// Partial update for an activity.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityChanges {
    /// Move to another cow.
    #[serde(default, alias = "cow")]
    pub cow_id: Option<CowId>,
    /// New kind.
    #[serde(default, rename = "type")]
    pub activity_type: Option<ActivityType>,
    /// New notes.
    pub notes: Option<String>,
    /// New date.
    pub date: Option<NaiveDate>,
}

/// Attribute filter for activity listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityFilter {
    /// Exact id.
    #[serde(skip)]
    pub id: Option<ActivityId>,
    /// Only activities of this cow.
    #[serde(alias = "cow")]
    pub cow_id: Option<CowId>,
    /// Only activities of this kind.
    #[serde(rename = "type")]
    pub activity_type: Option<ActivityType>,
}

impl ActivityFilter {
    /// Whether an activity row satisfies the filter.
    pub fn matches(&self, activity: &Activity) -> bool {
        self.id.is_none_or(|id| activity.id == id)
            && self.cow_id.is_none_or(|c| activity.cow_id == c)
            && self.activity_type.is_none_or(|t| activity.activity_type == t)
    }
}
