//! Farmer profile repository implementation.

use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder};

use farmhub_core::error::AppError;
use farmhub_core::result::AppResult;
use farmhub_core::traits::Repository;
use farmhub_core::types::{FarmerProfileId, Predicate, ResourceKind};
use farmhub_entity::farm::{
    FarmerProfile, FarmerProfileChanges, FarmerProfileFilter, NewFarmerProfile,
};

use super::{ScopeSql, push_scope, read_error, write_error};

const SCOPE: ScopeSql = ScopeSql {
    managed: ("f.agent_id = ", ""),
    owned: Some(("p.user_id = ", "")),
};

const CONSTRAINTS: &[(&str, &str)] = &[
    (
        "farmer_profiles_user_id_key",
        "This user already has a farmer profile.",
    ),
    ("farmer_profiles_user_id_fkey", "User not found."),
    ("farmer_profiles_farm_id_fkey", "Farm not found."),
];

/// Repository for farmer profiles.
#[derive(Debug, Clone)]
pub struct FarmerProfileRepository {
    pool: PgPool,
}

impl FarmerProfileRepository {
    /// Create a new farmer profile repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn select<'a>(
        predicate: &Predicate<FarmerProfileFilter>,
        head: &str,
    ) -> QueryBuilder<'a, sqlx::Postgres> {
        let mut qb = QueryBuilder::new(head);
        qb.push(" FROM farmer_profiles p JOIN farms f ON f.id = p.farm_id WHERE TRUE");
        push_scope(&mut qb, &predicate.scope, &SCOPE);
        let filter = &predicate.filter;
        if let Some(id) = filter.id {
            qb.push(" AND p.id = ").push_bind(id);
        }
        if let Some(user_id) = filter.user_id {
            qb.push(" AND p.user_id = ").push_bind(user_id);
        }
        if let Some(farm_id) = filter.farm_id {
            qb.push(" AND p.farm_id = ").push_bind(farm_id);
        }
        qb
    }
}

#[async_trait]
impl Repository<FarmerProfile> for FarmerProfileRepository {
    async fn find(
        &self,
        predicate: &Predicate<FarmerProfileFilter>,
    ) -> AppResult<Vec<FarmerProfile>> {
        let mut qb = Self::select(predicate, "SELECT p.*");
        qb.push(" ORDER BY p.id ASC");
        qb.build_query_as::<FarmerProfile>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| read_error(e, "Failed to list farmer profiles"))
    }

    async fn find_one(&self, id: FarmerProfileId) -> AppResult<Option<FarmerProfile>> {
        sqlx::query_as::<_, FarmerProfile>("SELECT * FROM farmer_profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| read_error(e, "Failed to find farmer profile by id"))
    }

    async fn exists(&self, predicate: &Predicate<FarmerProfileFilter>) -> AppResult<bool> {
        let mut qb = Self::select(predicate, "SELECT EXISTS (SELECT 1");
        qb.push(")");
        qb.build_query_scalar::<bool>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| read_error(e, "Failed to check farmer profile visibility"))
    }

    async fn insert(&self, new: &NewFarmerProfile) -> AppResult<FarmerProfile> {
        sqlx::query_as::<_, FarmerProfile>(
            "INSERT INTO farmer_profiles (user_id, farm_id) VALUES ($1, $2) RETURNING *",
        )
        .bind(new.user_id)
        .bind(new.farm_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, "Failed to create farmer profile", CONSTRAINTS))
    }

    async fn update(
        &self,
        id: FarmerProfileId,
        changes: &FarmerProfileChanges,
    ) -> AppResult<FarmerProfile> {
        sqlx::query_as::<_, FarmerProfile>(
            "UPDATE farmer_profiles \
             SET user_id = COALESCE($2, user_id), farm_id = COALESCE($3, farm_id) \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(changes.user_id)
        .bind(changes.farm_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error(e, "Failed to update farmer profile", CONSTRAINTS))?
        .ok_or_else(|| AppError::not_found(ResourceKind::FarmerProfile.not_found_message()))
    }

    async fn delete(&self, id: FarmerProfileId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM farmer_profiles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| read_error(e, "Failed to delete farmer profile"))?;
        Ok(result.rows_affected() > 0)
    }
}
