//! Husbandry activity CRUD.

use std::sync::Arc;

use tracing::info;

use farmhub_auth::{AuthorizationEngine, Operation};
use farmhub_core::result::AppResult;
use farmhub_core::traits::Repository;
use farmhub_core::types::{ActivityId, ResourceKind};
use farmhub_entity::livestock::{Activity, ActivityChanges, ActivityFilter, NewActivity};

use crate::context::RequestContext;

/// Manages activities. Visibility follows the activity's cow.
#[derive(Clone)]
pub struct ActivityService {
    engine: Arc<AuthorizationEngine>,
    activities: Arc<dyn Repository<Activity>>,
}

impl ActivityService {
    /// Creates a new activity service.
    pub fn new(engine: Arc<AuthorizationEngine>) -> Self {
        Self {
            activities: engine.repositories().activities.clone(),
            engine,
        }
    }

    /// Lists visible activities, newest first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        filter: ActivityFilter,
    ) -> AppResult<Vec<Activity>> {
        let predicate = self.engine.list_predicate::<Activity>(&ctx.actor, filter)?;
        self.activities.find(&predicate).await
    }

    /// Gets an activity by id.
    pub async fn get(&self, ctx: &RequestContext, id: ActivityId) -> AppResult<Activity> {
        self.engine
            .authorize_target(&ctx.actor, self.activities.as_ref(), Operation::Retrieve, id)
            .await
    }

    /// Records an activity against a cow the caller controls.
    pub async fn create(&self, ctx: &RequestContext, new: NewActivity) -> AppResult<Activity> {
        self.engine
            .require_cow(&ctx.actor, ResourceKind::Activity, Operation::Create, new.cow_id)
            .await?;

        let activity = self.activities.insert(&new).await?;

        info!(
            actor_id = %ctx.user_id(),
            activity_id = %activity.id,
            cow_id = %activity.cow_id,
            activity_type = %activity.activity_type,
            "Activity recorded"
        );

        Ok(activity)
    }

    /// Applies a partial update. Moving the activity requires control of
    /// the new cow too.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: ActivityId,
        changes: ActivityChanges,
    ) -> AppResult<Activity> {
        self.engine
            .authorize_target(&ctx.actor, self.activities.as_ref(), Operation::Update, id)
            .await?;
        if let Some(cow_id) = changes.cow_id {
            self.engine
                .require_cow(&ctx.actor, ResourceKind::Activity, Operation::Update, cow_id)
                .await?;
        }

        let activity = self.activities.update(id, &changes).await?;

        info!(actor_id = %ctx.user_id(), activity_id = %activity.id, "Activity updated");

        Ok(activity)
    }

    /// Deletes an activity.
    pub async fn delete(&self, ctx: &RequestContext, id: ActivityId) -> AppResult<()> {
        self.engine
            .authorize_target(&ctx.actor, self.activities.as_ref(), Operation::Delete, id)
            .await?;
        self.activities.delete(id).await?;

        info!(actor_id = %ctx.user_id(), activity_id = %id, "Activity deleted");

        Ok(())
    }
}
