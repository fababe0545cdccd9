//! Farm and farmer profile services.

pub mod profile;
pub mod service;

pub use profile::FarmerProfileService;
pub use service::FarmService;
