//! Activity repository implementation.

use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder};

use farmhub_core::error::AppError;
use farmhub_core::result::AppResult;
use farmhub_core::traits::Repository;
use farmhub_core::types::{ActivityId, Predicate, ResourceKind};
use farmhub_entity::livestock::{Activity, ActivityChanges, ActivityFilter, NewActivity};

use super::cow::{COW_JOINS, COW_SCOPE};
use super::{push_scope, read_error, write_error};

const CONSTRAINTS: &[(&str, &str)] = &[("activities_cow_id_fkey", "Cow not found.")];

/// Repository for husbandry activities.
#[derive(Debug, Clone)]
pub struct ActivityRepository {
    pool: PgPool,
}

impl ActivityRepository {
    /// Create a new activity repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn select<'a>(
        predicate: &Predicate<ActivityFilter>,
        head: &str,
    ) -> QueryBuilder<'a, sqlx::Postgres> {
        let mut qb = QueryBuilder::new(head);
        qb.push(" FROM activities a JOIN cows c ON c.id = a.cow_id")
            .push(COW_JOINS)
            .push(" WHERE TRUE");
        push_scope(&mut qb, &predicate.scope, &COW_SCOPE);
        let filter = &predicate.filter;
        if let Some(id) = filter.id {
            qb.push(" AND a.id = ").push_bind(id);
        }
        if let Some(cow_id) = filter.cow_id {
            qb.push(" AND a.cow_id = ").push_bind(cow_id);
        }
        if let Some(activity_type) = filter.activity_type {
            qb.push(" AND a.type = ").push_bind(activity_type);
        }
        qb
    }
}

#[async_trait]
impl Repository<Activity> for ActivityRepository {
    async fn find(&self, predicate: &Predicate<ActivityFilter>) -> AppResult<Vec<Activity>> {
        let mut qb = Self::select(predicate, "SELECT a.*");
        qb.push(" ORDER BY a.date DESC, a.id DESC");
        qb.build_query_as::<Activity>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| read_error(e, "Failed to list activities"))
    }

    async fn find_one(&self, id: ActivityId) -> AppResult<Option<Activity>> {
        sqlx::query_as::<_, Activity>("SELECT * FROM activities WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| read_error(e, "Failed to find activity by id"))
    }

    async fn exists(&self, predicate: &Predicate<ActivityFilter>) -> AppResult<bool> {
        let mut qb = Self::select(predicate, "SELECT EXISTS (SELECT 1");
        qb.push(")");
        qb.build_query_scalar::<bool>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| read_error(e, "Failed to check activity visibility"))
    }

    async fn insert(&self, new: &NewActivity) -> AppResult<Activity> {
        sqlx::query_as::<_, Activity>(
            "INSERT INTO activities (cow_id, type, notes, date) VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(new.cow_id)
        .bind(new.activity_type)
        .bind(&new.notes)
        .bind(new.date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, "Failed to create activity", CONSTRAINTS))
    }

    async fn update(&self, id: ActivityId, changes: &ActivityChanges) -> AppResult<Activity> {
        sqlx::query_as::<_, Activity>(
            "UPDATE activities SET \
             cow_id = COALESCE($2, cow_id), \
             type = COALESCE($3, type), \
             notes = COALESCE($4, notes), \
             date = COALESCE($5, date) \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(changes.cow_id)
        .bind(changes.activity_type)
        .bind(&changes.notes)
        .bind(changes.date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error(e, "Failed to update activity", CONSTRAINTS))?
        .ok_or_else(|| AppError::not_found(ResourceKind::Activity.not_found_message()))
    }

    async fn delete(&self, id: ActivityId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM activities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| read_error(e, "Failed to delete activity"))?;
        Ok(result.rows_affected() > 0)
    }
}
