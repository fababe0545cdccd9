//! Farm repository implementation.

use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder};

use farmhub_core::error::AppError;
use farmhub_core::result::AppResult;
use farmhub_core::traits::Repository;
use farmhub_core::types::{FarmId, Predicate, ResourceKind};
use farmhub_entity::farm::{Farm, FarmChanges, FarmFilter, NewFarm};

use super::{ScopeSql, push_scope, read_error, write_error};

const SCOPE: ScopeSql = ScopeSql {
    managed: ("f.agent_id = ", ""),
    owned: None,
};

const CONSTRAINTS: &[(&str, &str)] = &[("farms_agent_id_fkey", "Agent not found.")];

/// Repository for farms.
#[derive(Debug, Clone)]
pub struct FarmRepository {
    pool: PgPool,
}

impl FarmRepository {
    /// Create a new farm repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn select<'a>(predicate: &Predicate<FarmFilter>, head: &str) -> QueryBuilder<'a, sqlx::Postgres> {
        let mut qb = QueryBuilder::new(head);
        qb.push(" FROM farms f WHERE TRUE");
        push_scope(&mut qb, &predicate.scope, &SCOPE);
        if let Some(id) = predicate.filter.id {
            qb.push(" AND f.id = ").push_bind(id);
        }
        qb
    }
}

#[async_trait]
impl Repository<Farm> for FarmRepository {
    async fn find(&self, predicate: &Predicate<FarmFilter>) -> AppResult<Vec<Farm>> {
        let mut qb = Self::select(predicate, "SELECT f.*");
        qb.push(" ORDER BY f.name ASC, f.id ASC");
        qb.build_query_as::<Farm>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| read_error(e, "Failed to list farms"))
    }

    async fn find_one(&self, id: FarmId) -> AppResult<Option<Farm>> {
        sqlx::query_as::<_, Farm>("SELECT * FROM farms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| read_error(e, "Failed to find farm by id"))
    }

    async fn exists(&self, predicate: &Predicate<FarmFilter>) -> AppResult<bool> {
        let mut qb = Self::select(predicate, "SELECT EXISTS (SELECT 1");
        qb.push(")");
        qb.build_query_scalar::<bool>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| read_error(e, "Failed to check farm visibility"))
    }

    async fn insert(&self, new: &NewFarm) -> AppResult<Farm> {
        sqlx::query_as::<_, Farm>(
            "INSERT INTO farms (name, location, agent_id) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&new.name)
        .bind(&new.location)
        .bind(new.agent_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, "Failed to create farm", CONSTRAINTS))
    }

    async fn update(&self, id: FarmId, changes: &FarmChanges) -> AppResult<Farm> {
        let mut qb = QueryBuilder::new("UPDATE farms SET ");
        let mut set = qb.separated(", ");
        let mut touched = false;
        if let Some(name) = &changes.name {
            set.push("name = ").push_bind_unseparated(name.clone());
            touched = true;
        }
        if let Some(location) = &changes.location {
            set.push("location = ").push_bind_unseparated(location.clone());
            touched = true;
        }
        if let Some(agent_id) = changes.agent_id {
            set.push("agent_id = ").push_bind_unseparated(agent_id);
            touched = true;
        }
        if !touched {
            return self
                .find_one(id)
                .await?
                .ok_or_else(|| AppError::not_found(ResourceKind::Farm.not_found_message()));
        }
        qb.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        qb.build_query_as::<Farm>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| write_error(e, "Failed to update farm", CONSTRAINTS))?
            .ok_or_else(|| AppError::not_found(ResourceKind::Farm.not_found_message()))
    }

    async fn delete(&self, id: FarmId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM farms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| read_error(e, "Failed to delete farm"))?;
        Ok(result.rows_affected() > 0)
    }
}
