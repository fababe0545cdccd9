//! Farm CRUD with agent scoping.

use std::sync::Arc;

use tracing::info;

use farmhub_auth::{AuthorizationEngine, Operation};
use farmhub_core::error::AppError;
use farmhub_core::result::AppResult;
use farmhub_core::traits::Repository;
use farmhub_core::types::{FarmId, UserId};
use farmhub_entity::farm::{Farm, FarmChanges, FarmFilter, NewFarm};
use farmhub_entity::user::{Role, User};
use farmhub_entity::validation;

use crate::context::RequestContext;

/// Manages farms. Agents see and edit only the farms assigned to them.
#[derive(Clone)]
pub struct FarmService {
    engine: Arc<AuthorizationEngine>,
    farms: Arc<dyn Repository<Farm>>,
    users: Arc<dyn Repository<User>>,
}

impl FarmService {
    /// Creates a new farm service.
    pub fn new(engine: Arc<AuthorizationEngine>) -> Self {
        let repos = engine.repositories();
        Self {
            farms: repos.farms.clone(),
            users: repos.users.clone(),
            engine,
        }
    }

    /// Lists the farms visible to the caller, ordered by name.
    pub async fn list(&self, ctx: &RequestContext, filter: FarmFilter) -> AppResult<Vec<Farm>> {
        let predicate = self.engine.list_predicate::<Farm>(&ctx.actor, filter)?;
        self.farms.find(&predicate).await
    }

    /// Gets a farm by id.
    pub async fn get(&self, ctx: &RequestContext, id: FarmId) -> AppResult<Farm> {
        self.engine
            .authorize_target(&ctx.actor, self.farms.as_ref(), Operation::Retrieve, id)
            .await
    }

    /// Creates a farm. Agents always become the farm's agent.
    pub async fn create(&self, ctx: &RequestContext, new: NewFarm) -> AppResult<Farm> {
        let new = self.engine.prepare_farm_create(&ctx.actor, new)?;
        validation::check(&new)?;
        if let Some(agent_id) = new.agent_id {
            self.require_agent(agent_id).await?;
        }

        let farm = self.farms.insert(&new).await?;

        info!(
            actor_id = %ctx.user_id(),
            farm_id = %farm.id,
            agent_id = ?farm.agent_id,
            "Farm created"
        );

        Ok(farm)
    }

    /// Applies a partial update.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: FarmId,
        changes: FarmChanges,
    ) -> AppResult<Farm> {
        self.engine
            .authorize_target(&ctx.actor, self.farms.as_ref(), Operation::Update, id)
            .await?;
        self.engine.check_farm_update(&ctx.actor, &changes)?;
        validation::check(&changes)?;
        if let Some(Some(agent_id)) = changes.agent_id {
            self.require_agent(agent_id).await?;
        }

        let farm = self.farms.update(id, &changes).await?;

        info!(actor_id = %ctx.user_id(), farm_id = %farm.id, "Farm updated");

        Ok(farm)
    }

    /// Deletes a farm together with its profiles, cows and their records.
    pub async fn delete(&self, ctx: &RequestContext, id: FarmId) -> AppResult<()> {
        self.engine
            .authorize_target(&ctx.actor, self.farms.as_ref(), Operation::Delete, id)
            .await?;
        self.farms.delete(id).await?;

        info!(actor_id = %ctx.user_id(), farm_id = %id, "Farm deleted");

        Ok(())
    }

    async fn require_agent(&self, agent_id: UserId) -> AppResult<()> {
        let user = self
            .users
            .find_one(agent_id)
            .await?
            .ok_or_else(|| AppError::validation("agent_id: Agent not found."))?;
        if user.role != Role::Agent {
            return Err(AppError::validation(
                "agent_id: Selected user is not an AGENT.",
            ));
        }
        Ok(())
    }
}
