//! Milk record CRUD.

use std::sync::Arc;

use tracing::info;

use farmhub_auth::{AuthorizationEngine, Operation};
use farmhub_core::result::AppResult;
use farmhub_core::traits::Repository;
use farmhub_core::types::{MilkRecordId, ResourceKind};
use farmhub_entity::production::{
    MilkRecord, MilkRecordChanges, MilkRecordFilter, NewMilkRecord, normalize_liters,
};

use crate::context::RequestContext;

/// Manages daily milk yields, one per cow and day.
#[derive(Clone)]
pub struct MilkRecordService {
    engine: Arc<AuthorizationEngine>,
    records: Arc<dyn Repository<MilkRecord>>,
}

impl MilkRecordService {
    /// Creates a new milk record service.
    pub fn new(engine: Arc<AuthorizationEngine>) -> Self {
        Self {
            records: engine.repositories().milk_records.clone(),
            engine,
        }
    }

    /// Lists visible records, newest first. `cow_id`, `date_from` and
    /// `date_to` narrow the scoped result.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        filter: MilkRecordFilter,
    ) -> AppResult<Vec<MilkRecord>> {
        let predicate = self
            .engine
            .list_predicate::<MilkRecord>(&ctx.actor, filter)?;
        self.records.find(&predicate).await
    }

    /// Gets a record by id.
    pub async fn get(&self, ctx: &RequestContext, id: MilkRecordId) -> AppResult<MilkRecord> {
        self.engine
            .authorize_target(&ctx.actor, self.records.as_ref(), Operation::Retrieve, id)
            .await
    }

    /// Records a yield. A second record for the same cow and day is a
    /// constraint violation.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        mut new: NewMilkRecord,
    ) -> AppResult<MilkRecord> {
        self.engine
            .scope(&ctx.actor, ResourceKind::MilkRecord, Operation::Create)?;
        new.liters = normalize_liters(new.liters)?;
        self.engine
            .require_cow(&ctx.actor, ResourceKind::MilkRecord, Operation::Create, new.cow_id)
            .await?;

        let record = self.records.insert(&new).await?;

        info!(
            actor_id = %ctx.user_id(),
            record_id = %record.id,
            cow_id = %record.cow_id,
            date = %record.date,
            liters = %record.liters,
            "Milk record created"
        );

        Ok(record)
    }

    /// Applies a partial update.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: MilkRecordId,
        mut changes: MilkRecordChanges,
    ) -> AppResult<MilkRecord> {
        self.engine
            .authorize_target(&ctx.actor, self.records.as_ref(), Operation::Update, id)
            .await?;
        if let Some(liters) = changes.liters {
            changes.liters = Some(normalize_liters(liters)?);
        }
        if let Some(cow_id) = changes.cow_id {
            self.engine
                .require_cow(&ctx.actor, ResourceKind::MilkRecord, Operation::Update, cow_id)
                .await?;
        }

        let record = self.records.update(id, &changes).await?;

        info!(
            actor_id = %ctx.user_id(),
            record_id = %record.id,
            liters = %record.liters,
            "Milk record updated"
        );

        Ok(record)
    }

    /// Deletes a record.
    pub async fn delete(&self, ctx: &RequestContext, id: MilkRecordId) -> AppResult<()> {
        self.engine
            .authorize_target(&ctx.actor, self.records.as_ref(), Operation::Delete, id)
            .await?;
        self.records.delete(id).await?;

        info!(actor_id = %ctx.user_id(), record_id = %id, "Milk record deleted");

        Ok(())
    }
}
