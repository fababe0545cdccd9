//! Password policy for new and changed passwords.

use farmhub_core::config::AuthConfig;
use farmhub_core::error::AppError;

/// Enforces the configured minimum length.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Rejects passwords shorter than the minimum, counted in characters.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "password: This password is too short. It must contain at least {} characters.",
                self.min_length
            )));
        }
        Ok(())
    }
}
