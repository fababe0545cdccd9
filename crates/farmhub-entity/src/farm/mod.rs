//! Farms and the farmer profiles attached to them.

pub mod model;
pub mod profile;

pub use model::{Farm, FarmChanges, FarmFilter, NewFarm};
pub use profile::{
    CreateFarmerProfile, FarmerProfile, FarmerProfileChanges, FarmerProfileFilter,
    NewFarmerProfile,
};
