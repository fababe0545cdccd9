//! Farmer profile CRUD.

use std::sync::Arc;

use tracing::info;

use farmhub_auth::{AuthorizationEngine, Operation};
use farmhub_core::error::AppError;
use farmhub_core::result::AppResult;
use farmhub_core::traits::Repository;
use farmhub_core::types::{FarmerProfileId, Predicate, Scope, UserId};
use farmhub_entity::farm::{
    CreateFarmerProfile, FarmerProfile, FarmerProfileChanges, FarmerProfileFilter,
};
use farmhub_entity::livestock::{Cow, CowFilter};
use farmhub_entity::user::{Role, User};

use crate::context::RequestContext;

/// Manages farmer profiles.
///
/// Agents manage the profiles on their farms; a farmer can only read and
/// update its own profile.
#[derive(Clone)]
pub struct FarmerProfileService {
    engine: Arc<AuthorizationEngine>,
    profiles: Arc<dyn Repository<FarmerProfile>>,
    users: Arc<dyn Repository<User>>,
    cows: Arc<dyn Repository<Cow>>,
}

impl FarmerProfileService {
    /// Creates a new farmer profile service.
    pub fn new(engine: Arc<AuthorizationEngine>) -> Self {
        let repos = engine.repositories();
        Self {
            profiles: repos.profiles.clone(),
            users: repos.users.clone(),
            cows: repos.cows.clone(),
            engine,
        }
    }

    /// Lists visible profiles.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        filter: FarmerProfileFilter,
    ) -> AppResult<Vec<FarmerProfile>> {
        let predicate = self
            .engine
            .list_predicate::<FarmerProfile>(&ctx.actor, filter)?;
        self.profiles.find(&predicate).await
    }

    /// Gets a profile by id.
    pub async fn get(&self, ctx: &RequestContext, id: FarmerProfileId) -> AppResult<FarmerProfile> {
        self.engine
            .authorize_target(&ctx.actor, self.profiles.as_ref(), Operation::Retrieve, id)
            .await
    }

    /// Attaches a FARMER user to a farm.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        payload: CreateFarmerProfile,
    ) -> AppResult<FarmerProfile> {
        let new = self.engine.prepare_profile_create(&ctx.actor, payload).await?;
        self.require_farmer(new.user_id).await?;

        let profile = self.profiles.insert(&new).await?;

        info!(
            actor_id = %ctx.user_id(),
            profile_id = %profile.id,
            user_id = %profile.user_id,
            farm_id = %profile.farm_id,
            "Farmer profile created"
        );

        Ok(profile)
    }

    /// Applies a partial update.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: FarmerProfileId,
        changes: FarmerProfileChanges,
    ) -> AppResult<FarmerProfile> {
        let target = self
            .engine
            .authorize_target(&ctx.actor, self.profiles.as_ref(), Operation::Update, id)
            .await?;
        self.engine
            .check_profile_update(&ctx.actor, &target, &changes)
            .await?;

        if let Some(user_id) = changes.user_id.filter(|u| *u != target.user_id) {
            self.require_farmer(user_id).await?;
        }
        if changes.farm_id.is_some_and(|f| f != target.farm_id) {
            let owns_cows = self
                .cows
                .exists(&Predicate::new(
                    Scope::Unrestricted,
                    CowFilter {
                        owner_id: Some(id),
                        ..Default::default()
                    },
                ))
                .await?;
            if owns_cows {
                return Err(AppError::validation(
                    "farm_id: Cannot move a farmer profile that still owns cows on its farm.",
                ));
            }
        }

        let profile = self.profiles.update(id, &changes).await?;

        info!(actor_id = %ctx.user_id(), profile_id = %profile.id, "Farmer profile updated");

        Ok(profile)
    }

    /// Deletes a profile and the cows it owns.
    pub async fn delete(&self, ctx: &RequestContext, id: FarmerProfileId) -> AppResult<()> {
        self.engine
            .authorize_target(&ctx.actor, self.profiles.as_ref(), Operation::Delete, id)
            .await?;
        self.profiles.delete(id).await?;

        info!(actor_id = %ctx.user_id(), profile_id = %id, "Farmer profile deleted");

        Ok(())
    }

    async fn require_farmer(&self, user_id: UserId) -> AppResult<()> {
        let user = self
            .users
            .find_one(user_id)
            .await?
            .ok_or_else(|| AppError::validation("user_id: User not found."))?;
        if user.role != Role::Farmer {
            return Err(AppError::validation(
                "user_id: Selected user is not a FARMER.",
            ));
        }
        Ok(())
    }
}
