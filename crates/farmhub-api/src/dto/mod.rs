//! Response envelopes.

pub mod response;

pub use response::{ApiResponse, MessageResponse};
