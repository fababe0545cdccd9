//! Milk record repository implementation.

use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder};

use farmhub_core::error::AppError;
use farmhub_core::result::AppResult;
use farmhub_core::traits::Repository;
use farmhub_core::types::{MilkRecordId, Predicate, ResourceKind};
use farmhub_entity::production::{MilkRecord, MilkRecordChanges, MilkRecordFilter, NewMilkRecord};

use super::cow::{COW_JOINS, COW_SCOPE};
use super::{push_scope, read_error, write_error};

const CONSTRAINTS: &[(&str, &str)] = &[
    (
        "milk_records_cow_id_date_key",
        "A milk record for this cow and date already exists.",
    ),
    ("milk_records_liters_check", "liters: must not be negative"),
    ("milk_records_cow_id_fkey", "Cow not found."),
];

/// Repository for milk records.
#[derive(Debug, Clone)]
pub struct MilkRecordRepository {
    pool: PgPool,
}

impl MilkRecordRepository {
    /// Create a new milk record repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn select<'a>(
        predicate: &Predicate<MilkRecordFilter>,
        head: &str,
    ) -> QueryBuilder<'a, sqlx::Postgres> {
        let mut qb = QueryBuilder::new(head);
        qb.push(" FROM milk_records m JOIN cows c ON c.id = m.cow_id")
            .push(COW_JOINS)
            .push(" WHERE TRUE");
        push_scope(&mut qb, &predicate.scope, &COW_SCOPE);
        let filter = &predicate.filter;
        if let Some(id) = filter.id {
            qb.push(" AND m.id = ").push_bind(id);
        }
        if let Some(cow_id) = filter.cow_id {
            qb.push(" AND m.cow_id = ").push_bind(cow_id);
        }
        if let Some(from) = filter.date_from {
            qb.push(" AND m.date >= ").push_bind(from);
        }
        if let Some(to) = filter.date_to {
            qb.push(" AND m.date <= ").push_bind(to);
        }
        qb
    }
}

#[async_trait]
impl Repository<MilkRecord> for MilkRecordRepository {
    async fn find(&self, predicate: &Predicate<MilkRecordFilter>) -> AppResult<Vec<MilkRecord>> {
        let mut qb = Self::select(predicate, "SELECT m.*");
        qb.push(" ORDER BY m.date DESC, m.id DESC");
        qb.build_query_as::<MilkRecord>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| read_error(e, "Failed to list milk records"))
    }

    async fn find_one(&self, id: MilkRecordId) -> AppResult<Option<MilkRecord>> {
        sqlx::query_as::<_, MilkRecord>("SELECT * FROM milk_records WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| read_error(e, "Failed to find milk record by id"))
    }

    async fn exists(&self, predicate: &Predicate<MilkRecordFilter>) -> AppResult<bool> {
        let mut qb = Self::select(predicate, "SELECT EXISTS (SELECT 1");
        qb.push(")");
        qb.build_query_scalar::<bool>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| read_error(e, "Failed to check milk record visibility"))
    }

    async fn insert(&self, new: &NewMilkRecord) -> AppResult<MilkRecord> {
        sqlx::query_as::<_, MilkRecord>(
            "INSERT INTO milk_records (cow_id, date, liters) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(new.cow_id)
        .bind(new.date)
        .bind(new.liters)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, "Failed to create milk record", CONSTRAINTS))
    }

    async fn update(&self, id: MilkRecordId, changes: &MilkRecordChanges) -> AppResult<MilkRecord> {
        sqlx::query_as::<_, MilkRecord>(
            "UPDATE milk_records SET \
             cow_id = COALESCE($2, cow_id), \
             date = COALESCE($3, date), \
             liters = COALESCE($4, liters) \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(changes.cow_id)
        .bind(changes.date)
        .bind(changes.liters)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error(e, "Failed to update milk record", CONSTRAINTS))?
        .ok_or_else(|| AppError::not_found(ResourceKind::MilkRecord.not_found_message()))
    }

    async fn delete(&self, id: MilkRecordId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM milk_records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| read_error(e, "Failed to delete milk record"))?;
        Ok(result.rows_affected() > 0)
    }
}
