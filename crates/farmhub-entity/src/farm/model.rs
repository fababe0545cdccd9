//! Farm entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use farmhub_core::traits::Resource;
use farmhub_core::types::{FarmId, ResourceKind, UserId};

use crate::serde_util::{double_option, trimmed, trimmed_option};
use crate::validation::not_blank;

/// A farm, optionally managed by an agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Farm {
    /// Unique farm identifier.
    pub id: FarmId,
    /// Display name.
    pub name: String,
    /// Free-form location.
    pub location: String,
    /// Managing agent; `None` when unassigned.
    pub agent_id: Option<UserId>,
}

impl Resource for Farm {
    type Id = FarmId;
    type New = NewFarm;
    type Changes = FarmChanges;
    type Filter = FarmFilter;

    const KIND: ResourceKind = ResourceKind::Farm;

    fn by_id(id: FarmId) -> FarmFilter {
        FarmFilter { id: Some(id) }
    }
}

/// Data required to create a farm.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewFarm {
    /// Display name.
    #[serde(deserialize_with = "trimmed")]
    #[validate(
        length(min = 1, max = 255, message = "must be between 1 and 255 characters"),
        custom(function = "not_blank")
    )]
    pub name: String,
    /// Free-form location.
    #[serde(deserialize_with = "trimmed")]
    #[validate(
        length(min = 1, max = 255, message = "must be between 1 and 255 characters"),
        custom(function = "not_blank")
    )]
    pub location: String,
    /// Managing agent.
    #[serde(default, alias = "agent")]
    pub agent_id: Option<UserId>,
}

/// Partial update for a farm.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct FarmChanges {
    /// New name.
    #[serde(default, deserialize_with = "trimmed_option")]
    #[validate(
        length(min = 1, max = 255, message = "must be between 1 and 255 characters"),
        custom(function = "not_blank")
    )]
    pub name: Option<String>,
    /// New location.
    #[serde(default, deserialize_with = "trimmed_option")]
    #[validate(
        length(min = 1, max = 255, message = "must be between 1 and 255 characters"),
        custom(function = "not_blank")
    )]
    pub location: Option<String>,
    /// `Some(None)` unassigns the agent.
    #[serde(default, alias = "agent", deserialize_with = "double_option")]
    pub agent_id: Option<Option<UserId>>,
}

/// Attribute filter for farm listings.
#[derive(Debug, Clone, Default)]
pub struct FarmFilter {
    /// Exact id.
    pub id: Option<FarmId>,
}

impl FarmFilter {
    /// Whether a farm row satisfies the filter.
    pub fn matches(&self, farm: &Farm) -> bool {
        self.id.is_none_or(|id| farm.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation;

    #[test]
    fn test_agent_alias_accepted() {
        let new: NewFarm =
            serde_json::from_str(r#"{"name": "A", "location": "B", "agent": 5}"#).unwrap();
        assert_eq!(new.agent_id, Some(UserId(5)));
    }

    #[test]
    fn test_blank_name_rejected() {
        let new = NewFarm {
            name: String::new(),
            location: "Rajshahi".into(),
            agent_id: None,
        };
        let err = validation::check(&new).unwrap_err();
        assert!(err.message.starts_with("name:"));
    }

    #[test]
    fn test_whitespace_only_name_and_location_rejected() {
        let new = NewFarm {
            name: "   ".into(),
            location: "  ".into(),
            agent_id: None,
        };
        let err = validation::check(&new).unwrap_err();
        assert_eq!(err.message, "location: may not be blank; name: may not be blank");

        let changes = FarmChanges {
            location: Some("\t".into()),
            ..Default::default()
        };
        assert!(validation::check(&changes).is_err());
    }

    #[test]
    fn test_payload_strings_are_trimmed() {
        let new: NewFarm =
            serde_json::from_str(r#"{"name": "  Padma Dairy  ", "location": " Rajshahi "}"#)
                .unwrap();
        assert_eq!(new.name, "Padma Dairy");
        assert_eq!(new.location, "Rajshahi");

        let new: NewFarm = serde_json::from_str(r#"{"name": "   ", "location": "B"}"#).unwrap();
        assert!(validation::check(&new).is_err());
    }

    #[test]
    fn test_explicit_null_unassigns() {
        let changes: FarmChanges = serde_json::from_str(r#"{"agent_id": null}"#).unwrap();
        assert_eq!(changes.agent_id, Some(None));
        let changes: FarmChanges = serde_json::from_str(r#"{"name": "X"}"#).unwrap();
        assert_eq!(changes.agent_id, None);
    }
}
