//! Cow and activity services.

pub mod activity;
pub mod cow;

pub use activity::ActivityService;
pub use cow::CowService;
