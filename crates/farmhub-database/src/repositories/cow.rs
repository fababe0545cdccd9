//! Cow repository implementation.

use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder};

use farmhub_core::error::AppError;
use farmhub_core::result::AppResult;
use farmhub_core::traits::Repository;
use farmhub_core::types::{CowId, Predicate, ResourceKind};
use farmhub_entity::livestock::{Cow, CowChanges, CowFilter, NewCow};

use super::{ScopeSql, push_scope, read_error, write_error};

/// Visibility follows `cow.farm.agent` for agents and `cow.owner.user` for
/// farmers.
pub(crate) const COW_SCOPE: ScopeSql = ScopeSql {
    managed: ("f.agent_id = ", ""),
    owned: Some(("o.user_id = ", "")),
};

/// Joins needed by [`COW_SCOPE`], given a cow aliased `c`.
pub(crate) const COW_JOINS: &str =
    " JOIN farms f ON f.id = c.farm_id JOIN farmer_profiles o ON o.id = c.owner_id";

const CONSTRAINTS: &[(&str, &str)] = &[
    (
        "cows_farm_id_tag_key",
        "A cow with this tag already exists on this farm.",
    ),
    ("cows_farm_id_fkey", "Farm not found."),
    ("cows_owner_id_fkey", "FarmerProfile not found."),
];

/// Repository for cows.
#[derive(Debug, Clone)]
pub struct CowRepository {
    pool: PgPool,
}

impl CowRepository {
    /// Create a new cow repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn select<'a>(predicate: &Predicate<CowFilter>, head: &str) -> QueryBuilder<'a, sqlx::Postgres> {
        let mut qb = QueryBuilder::new(head);
        qb.push(" FROM cows c").push(COW_JOINS).push(" WHERE TRUE");
        push_scope(&mut qb, &predicate.scope, &COW_SCOPE);
        let filter = &predicate.filter;
        if let Some(id) = filter.id {
            qb.push(" AND c.id = ").push_bind(id);
        }
        if let Some(farm_id) = filter.farm_id {
            qb.push(" AND c.farm_id = ").push_bind(farm_id);
        }
        if let Some(owner_id) = filter.owner_id {
            qb.push(" AND c.owner_id = ").push_bind(owner_id);
        }
        qb
    }
}

#[async_trait]
impl Repository<Cow> for CowRepository {
    async fn find(&self, predicate: &Predicate<CowFilter>) -> AppResult<Vec<Cow>> {
        let mut qb = Self::select(predicate, "SELECT c.*");
        qb.push(" ORDER BY c.id ASC");
        qb.build_query_as::<Cow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| read_error(e, "Failed to list cows"))
    }

    async fn find_one(&self, id: CowId) -> AppResult<Option<Cow>> {
        sqlx::query_as::<_, Cow>("SELECT * FROM cows WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| read_error(e, "Failed to find cow by id"))
    }

    async fn exists(&self, predicate: &Predicate<CowFilter>) -> AppResult<bool> {
        let mut qb = Self::select(predicate, "SELECT EXISTS (SELECT 1");
        qb.push(")");
        qb.build_query_scalar::<bool>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| read_error(e, "Failed to check cow visibility"))
    }

    async fn insert(&self, new: &NewCow) -> AppResult<Cow> {
        sqlx::query_as::<_, Cow>(
            "INSERT INTO cows (tag, breed, dob, farm_id, owner_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(&new.tag)
        .bind(&new.breed)
        .bind(new.dob)
        .bind(new.farm_id)
        .bind(new.owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, "Failed to create cow", CONSTRAINTS))
    }

    async fn update(&self, id: CowId, changes: &CowChanges) -> AppResult<Cow> {
        let mut qb = QueryBuilder::new("UPDATE cows SET ");
        let mut set = qb.separated(", ");
        let mut touched = false;
        if let Some(tag) = &changes.tag {
            set.push("tag = ").push_bind_unseparated(tag.clone());
            touched = true;
        }
        if let Some(breed) = &changes.breed {
            set.push("breed = ").push_bind_unseparated(breed.clone());
            touched = true;
        }
        if let Some(dob) = changes.dob {
            set.push("dob = ").push_bind_unseparated(dob);
            touched = true;
        }
        if let Some(farm_id) = changes.farm_id {
            set.push("farm_id = ").push_bind_unseparated(farm_id);
            touched = true;
        }
        if let Some(owner_id) = changes.owner_id {
            set.push("owner_id = ").push_bind_unseparated(owner_id);
            touched = true;
        }
        if !touched {
            return self
                .find_one(id)
                .await?
                .ok_or_else(|| AppError::not_found(ResourceKind::Cow.not_found_message()));
        }
        qb.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        qb.build_query_as::<Cow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| write_error(e, "Failed to update cow", CONSTRAINTS))?
            .ok_or_else(|| AppError::not_found(ResourceKind::Cow.not_found_message()))
    }

    async fn delete(&self, id: CowId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM cows WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| read_error(e, "Failed to delete cow"))?;
        Ok(result.rows_affected() > 0)
    }
}
