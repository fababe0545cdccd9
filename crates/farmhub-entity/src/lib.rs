//! # farmhub-entity
//!
//! Domain entity models for FarmHub. Every struct in this crate is either a
//! database row (deriving `sqlx::FromRow`), a write payload, or an attribute
//! filter. Each row type implements [`farmhub_core::traits::Resource`] so it
//! can be served by a generic repository.
//!
//! Ownership graph: `Farm -> agent User`, `FarmerProfile -> User + Farm`,
//! `Cow -> Farm + FarmerProfile`, `Activity -> Cow`, `MilkRecord -> Cow`.

pub mod farm;
pub mod livestock;
pub mod production;
pub mod serde_util;
pub mod user;
pub mod validation;
