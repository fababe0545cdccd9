//! Bearer token to [`Actor`] resolution.

use std::sync::Arc;

use tracing::debug;

use farmhub_core::error::AppError;
use farmhub_core::traits::Repository;
use farmhub_entity::user::User;

use crate::actor::Actor;
use crate::jwt::JwtDecoder;

/// Validates a token and snapshots the user it names.
#[derive(Clone)]
pub struct ActorResolver {
    decoder: JwtDecoder,
    users: Arc<dyn Repository<User>>,
}

impl std::fmt::Debug for ActorResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActorResolver")
            .field("decoder", &self.decoder)
            .finish()
    }
}

impl ActorResolver {
    /// Creates a resolver over the user repository.
    pub fn new(decoder: JwtDecoder, users: Arc<dyn Repository<User>>) -> Self {
        Self { decoder, users }
    }

    /// Resolves a raw bearer token. Unknown and inactive users are treated
    /// the same as a bad token.
    pub async fn resolve(&self, token: &str) -> Result<Actor, AppError> {
        let claims = self.decoder.decode(token)?;
        let user_id = claims.user_id()?;

        let user = self.users.find_one(user_id).await?.ok_or_else(|| {
            debug!(user_id = %user_id, "Token names an unknown user");
            AppError::unauthenticated("User not found")
        })?;

        if !user.is_active {
            debug!(user_id = %user_id, "Token names an inactive user");
            return Err(AppError::unauthenticated("User account is disabled"));
        }

        Ok(Actor::from_user(&user))
    }
}
