//! Cow CRUD with the owner/farm consistency rule.

use std::sync::Arc;

use tracing::info;

use farmhub_auth::{AuthorizationEngine, Operation};
use farmhub_core::error::AppError;
use farmhub_core::result::AppResult;
use farmhub_core::traits::Repository;
use farmhub_core::types::{CowId, FarmId, FarmerProfileId, ResourceKind};
use farmhub_entity::farm::FarmerProfile;
use farmhub_entity::livestock::{Cow, CowChanges, CowFilter, CreateCow};
use farmhub_entity::validation;

use crate::context::RequestContext;

/// Manages cows.
#[derive(Clone)]
pub struct CowService {
    engine: Arc<AuthorizationEngine>,
    cows: Arc<dyn Repository<Cow>>,
    profiles: Arc<dyn Repository<FarmerProfile>>,
}

impl CowService {
    /// Creates a new cow service.
    pub fn new(engine: Arc<AuthorizationEngine>) -> Self {
        let repos = engine.repositories();
        Self {
            cows: repos.cows.clone(),
            profiles: repos.profiles.clone(),
            engine,
        }
    }

    /// Lists visible cows.
    pub async fn list(&self, ctx: &RequestContext, filter: CowFilter) -> AppResult<Vec<Cow>> {
        let predicate = self.engine.list_predicate::<Cow>(&ctx.actor, filter)?;
        self.cows.find(&predicate).await
    }

    /// Gets a cow by id.
    pub async fn get(&self, ctx: &RequestContext, id: CowId) -> AppResult<Cow> {
        self.engine
            .authorize_target(&ctx.actor, self.cows.as_ref(), Operation::Retrieve, id)
            .await
    }

    /// Registers a cow.
    ///
    /// A farmer's cow always lands on the farmer's own farm and profile,
    /// whatever farm and owner the payload names.
    pub async fn create(&self, ctx: &RequestContext, payload: CreateCow) -> AppResult<Cow> {
        self.engine
            .scope(&ctx.actor, ResourceKind::Cow, Operation::Create)?;
        validation::check(&payload)?;

        let new = self.engine.prepare_cow_create(&ctx.actor, payload).await?;
        self.check_owner(new.owner_id, new.farm_id).await?;

        let cow = self.cows.insert(&new).await?;

        info!(
            actor_id = %ctx.user_id(),
            cow_id = %cow.id,
            farm_id = %cow.farm_id,
            owner_id = %cow.owner_id,
            "Cow created"
        );

        Ok(cow)
    }

    /// Applies a partial update.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: CowId,
        changes: CowChanges,
    ) -> AppResult<Cow> {
        let target = self
            .engine
            .authorize_target(&ctx.actor, self.cows.as_ref(), Operation::Update, id)
            .await?;
        validation::check(&changes)?;

        let changes = self.engine.prepare_cow_update(&ctx.actor, changes).await?;
        if changes.farm_id.is_some() || changes.owner_id.is_some() {
            let farm_id = changes.farm_id.unwrap_or(target.farm_id);
            let owner_id = changes.owner_id.unwrap_or(target.owner_id);
            self.check_owner(owner_id, farm_id).await?;
        }

        let cow = self.cows.update(id, &changes).await?;

        info!(actor_id = %ctx.user_id(), cow_id = %cow.id, "Cow updated");

        Ok(cow)
    }

    /// Deletes a cow with its activities and milk records.
    pub async fn delete(&self, ctx: &RequestContext, id: CowId) -> AppResult<()> {
        self.engine
            .authorize_target(&ctx.actor, self.cows.as_ref(), Operation::Delete, id)
            .await?;
        self.cows.delete(id).await?;

        info!(actor_id = %ctx.user_id(), cow_id = %id, "Cow deleted");

        Ok(())
    }

    /// The owner profile must exist and sit on the cow's farm.
    async fn check_owner(&self, owner_id: FarmerProfileId, farm_id: FarmId) -> AppResult<()> {
        let owner = self
            .profiles
            .find_one(owner_id)
            .await?
            .ok_or_else(|| AppError::validation("owner_id: FarmerProfile not found."))?;
        if owner.farm_id != farm_id {
            return Err(AppError::validation(
                "owner_id: Owner must belong to the same farm as the cow.",
            ));
        }
        Ok(())
    }
}
