//! Newtype wrappers around `i64` primary keys for all domain entities.
//!
//! Using distinct types prevents accidentally passing a `FarmId` where a
//! `CowId` is expected. When the `sqlx` feature is enabled, each ID type
//! is transparent over PostgreSQL `BIGINT`.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Macro to define a newtype ID wrapper around a `BIGSERIAL` key.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
        #[cfg_attr(feature = "sqlx", sqlx(transparent))]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Return the raw key value.
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<i64>().map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

define_id!(
    /// Unique identifier for a user account.
    UserId
);

define_id!(
    /// Unique identifier for a farm.
    FarmId
);

define_id!(
    /// Unique identifier for a farmer profile.
    FarmerProfileId
);

define_id!(
    /// Unique identifier for a cow.
    CowId
);

define_id!(
    /// Unique identifier for a husbandry activity.
    ActivityId
);

define_id!(
    /// Unique identifier for a milk record.
    MilkRecordId
);
