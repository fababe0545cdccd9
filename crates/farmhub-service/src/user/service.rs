//! User account management.

use std::sync::Arc;

use tracing::info;

use farmhub_auth::password::{PasswordHasher, PasswordValidator};
use farmhub_auth::{AuthorizationEngine, Operation};
use farmhub_core::error::AppError;
use farmhub_core::result::AppResult;
use farmhub_core::traits::Repository;
use farmhub_core::types::{Predicate, Scope, UserId};
use farmhub_entity::farm::FarmerProfileFilter;
use farmhub_entity::user::{
    CreateUser, NewUser, Role, UpdateUser, User, UserChanges, UserFilter,
};
use farmhub_entity::validation;

use crate::context::RequestContext;

/// Manages user accounts.
///
/// Platform admins manage everyone. Agents see themselves and farmers and
/// may enrol new farmers. Farmers see and edit only themselves.
#[derive(Clone)]
pub struct UserService {
    engine: Arc<AuthorizationEngine>,
    users: Arc<dyn Repository<User>>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        engine: Arc<AuthorizationEngine>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
    ) -> Self {
        Self {
            users: engine.repositories().users.clone(),
            engine,
            hasher,
            validator,
        }
    }

    /// Lists visible users, most recently joined first.
    pub async fn list(&self, ctx: &RequestContext, filter: UserFilter) -> AppResult<Vec<User>> {
        let predicate = self.engine.list_predicate::<User>(&ctx.actor, filter)?;
        self.users.find(&predicate).await
    }

    /// Gets a user by id.
    pub async fn get(&self, ctx: &RequestContext, id: UserId) -> AppResult<User> {
        self.engine
            .authorize_target(&ctx.actor, self.users.as_ref(), Operation::Retrieve, id)
            .await
    }

    /// Creates an account. Platform flags are never taken from the payload.
    pub async fn create(&self, ctx: &RequestContext, payload: CreateUser) -> AppResult<User> {
        self.engine.check_user_create(&ctx.actor, &payload)?;
        validation::check(&payload)?;
        self.validator.validate(&payload.password)?;

        let new = NewUser {
            username: payload.username,
            email: payload.email.unwrap_or_default(),
            first_name: payload.first_name,
            last_name: payload.last_name,
            role: payload.role,
            password_hash: self.hasher.hash(&payload.password)?,
            is_staff: false,
            is_superuser: false,
        };
        let user = self.users.insert(&new).await?;

        info!(
            actor_id = %ctx.user_id(),
            user_id = %user.id,
            role = %user.role,
            "User created"
        );

        Ok(user)
    }

    /// Applies a partial update. A new password is re-hashed.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: UserId,
        payload: UpdateUser,
    ) -> AppResult<User> {
        let target = self
            .engine
            .authorize_target(&ctx.actor, self.users.as_ref(), Operation::Update, id)
            .await?;
        self.engine.check_user_update(&ctx.actor, &target, &payload)?;
        validation::check(&payload)?;
        self.check_role_change(&target, payload.role).await?;

        let password_hash = match payload.password.as_deref() {
            Some(password) => {
                self.validator.validate(password)?;
                Some(self.hasher.hash(password)?)
            }
            None => None,
        };

        let changes = UserChanges {
            email: payload.email,
            first_name: payload.first_name,
            last_name: payload.last_name,
            role: payload.role,
            is_active: payload.is_active,
            password_hash,
            last_login: None,
        };
        let user = self.users.update(id, &changes).await?;

        info!(actor_id = %ctx.user_id(), user_id = %user.id, "User updated");

        Ok(user)
    }

    /// A farmer with a profile stays FARMER and an agent with farms stays
    /// AGENT.
    async fn check_role_change(&self, target: &User, role: Option<Role>) -> AppResult<()> {
        let Some(role) = role.filter(|role| *role != target.role) else {
            return Ok(());
        };
        let repos = self.engine.repositories();

        if role != Role::Farmer {
            let profile = Predicate::new(
                Scope::Unrestricted,
                FarmerProfileFilter {
                    user_id: Some(target.id),
                    ..Default::default()
                },
            );
            if repos.profiles.exists(&profile).await? {
                return Err(AppError::validation(
                    "role: This user has a farmer profile and must remain a FARMER.",
                ));
            }
        }
        if role != Role::Agent {
            let managed = Predicate::scoped(Scope::ManagedBy(target.id));
            if repos.farms.exists(&managed).await? {
                return Err(AppError::validation(
                    "role: This user manages farms and must remain an AGENT.",
                ));
            }
        }
        Ok(())
    }

    /// Deletes an account. Farms it managed become unassigned; its farmer
    /// profile and cows go with it.
    pub async fn delete(&self, ctx: &RequestContext, id: UserId) -> AppResult<()> {
        self.engine
            .authorize_target(&ctx.actor, self.users.as_ref(), Operation::Delete, id)
            .await?;
        if id == ctx.user_id() {
            return Err(AppError::validation("You cannot delete your own account."));
        }
        self.users.delete(id).await?;

        info!(actor_id = %ctx.user_id(), user_id = %id, "User deleted");

        Ok(())
    }
}
