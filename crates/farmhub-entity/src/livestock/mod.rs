//! Cows and their husbandry activities.

pub mod activity;
pub mod cow;

pub use activity::{Activity, ActivityChanges, ActivityFilter, ActivityType, NewActivity};
pub use cow::{Cow, CowChanges, CowFilter, CreateCow, NewCow};
