//! JWT claims carried by FarmHub access tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use farmhub_core::error::AppError;
use farmhub_core::types::UserId;

/// Claims payload embedded in every access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id as a decimal string.
    pub sub: String,
    /// Username at issuance, informational only.
    pub username: String,
    /// Issued-at (seconds since epoch).
    pub iat: i64,
    /// Expiration (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Parses the subject into a user id.
    pub fn user_id(&self) -> Result<UserId, AppError> {
        self.sub
            .parse()
            .map_err(|_| AppError::unauthenticated("Token subject is not a user id"))
    }

    /// Expiration as a timestamp.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}
