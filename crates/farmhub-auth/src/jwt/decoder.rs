//! Access-token validation.

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use farmhub_core::config::AuthConfig;
use farmhub_core::error::AppError;

use super::claims::Claims;

/// Verifies signature and expiry of HS256 access tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a token string.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                JwtErrorKind::ExpiredSignature => AppError::unauthenticated("Token has expired"),
                JwtErrorKind::InvalidSignature => {
                    AppError::unauthenticated("Invalid token signature")
                }
                JwtErrorKind::InvalidToken => AppError::unauthenticated("Invalid token format"),
                _ => AppError::unauthenticated(format!("Token validation failed: {e}")),
            }
        })?;

        Ok(data.claims)
    }
}
