//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Confirmation for writes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// A read result.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    /// A write result with a confirmation message.
    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data,
        }
    }
}

/// Body for operations that return no entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Always `true`.
    pub success: bool,
    /// Confirmation text.
    pub message: String,
}

impl MessageResponse {
    /// Creates a success message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Health check body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` or `"unavailable"`.
    pub status: String,
    /// `"connected"`, `"unreachable"` or `"memory"`.
    pub database: String,
}
