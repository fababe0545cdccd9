//! HTTP request handlers, one module per resource collection.

pub mod activity;
pub mod cow;
pub mod farm;
pub mod farmer_profile;
pub mod health;
pub mod milk_record;
pub mod user;
