//! Access-token issuance.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use farmhub_core::config::AuthConfig;
use farmhub_core::error::AppError;
use farmhub_entity::user::User;

use super::claims::Claims;

/// Signs HS256 access tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    access_ttl_minutes: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl_minutes: i64::try_from(config.jwt_access_ttl_minutes).unwrap_or(i64::MAX / 60),
        }
    }

    /// Issues an access token for the given user.
    pub fn issue(&self, user: &User) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let exp = now + Duration::minutes(self.access_ttl_minutes);

        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        Ok((token, exp))
    }
}
