//! In-process store implementing every repository.
//!
//! Selected with `database.url = "memory://"` and used by the test suites.
//! Enforces the same uniqueness, foreign-key and cascade rules as the
//! PostgreSQL schema so both backends behave alike behind the trait.

mod tables;

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use farmhub_core::error::AppError;
use farmhub_core::result::AppResult;
use farmhub_core::traits::{Repository, Resource};
use farmhub_core::types::{
    ActivityId, CowId, FarmId, FarmerProfileId, MilkRecordId, Predicate, ResourceKind, Scope,
    UserId,
};
use farmhub_entity::farm::{Farm, FarmerProfile};
use farmhub_entity::livestock::{Activity, Cow};
use farmhub_entity::production::MilkRecord;
use farmhub_entity::user::User;

/// Shared handle to the in-process tables. Cloning is cheap.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Row storage keyed by primary key, plus one sequence per table.
#[derive(Debug, Default)]
pub(crate) struct Tables {
    users: BTreeMap<UserId, User>,
    farms: BTreeMap<FarmId, Farm>,
    profiles: BTreeMap<FarmerProfileId, FarmerProfile>,
    cows: BTreeMap<CowId, Cow>,
    activities: BTreeMap<ActivityId, Activity>,
    milk_records: BTreeMap<MilkRecordId, MilkRecord>,
    sequences: HashMap<ResourceKind, i64>,
}

impl Tables {
    fn next_id(&mut self, kind: ResourceKind) -> i64 {
        let seq = self.sequences.entry(kind).or_insert(0);
        *seq += 1;
        *seq
    }
}

/// Per-entity storage rules used by [`MemoryRepository`].
pub(crate) trait Table: Resource {
    fn rows(tables: &Tables) -> &BTreeMap<Self::Id, Self>;
    fn rows_mut(tables: &mut Tables) -> &mut BTreeMap<Self::Id, Self>;
    fn make_id(raw: i64) -> Self::Id;

    /// Build a row from an insert payload.
    fn create(id: Self::Id, new: &Self::New) -> Self;
    /// Produce the updated row without storing it.
    fn apply(&self, changes: &Self::Changes) -> Self;

    fn visible(&self, tables: &Tables, scope: &Scope) -> bool;
    fn matches(&self, filter: &Self::Filter) -> bool;
    fn order(a: &Self, b: &Self) -> Ordering;

    /// Foreign-key, uniqueness and check constraints against other rows.
    fn check(&self, tables: &Tables) -> AppResult<()>;
    /// Remove the row and everything that cascades from it.
    fn remove(tables: &mut Tables, id: Self::Id) -> bool;
}

/// Generic repository over one in-process table.
pub(crate) struct MemoryRepository<R> {
    store: MemoryStore,
    _marker: PhantomData<fn() -> R>,
}

impl<R> MemoryRepository<R> {
    /// Create a repository view over the store.
    pub(crate) fn new(store: MemoryStore) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<R: Table> Repository<R> for MemoryRepository<R> {
    async fn find(&self, predicate: &Predicate<R::Filter>) -> AppResult<Vec<R>> {
        let tables = self.store.tables.read().await;
        let mut rows: Vec<R> = R::rows(&tables)
            .values()
            .filter(|row| row.visible(&tables, &predicate.scope) && row.matches(&predicate.filter))
            .cloned()
            .collect();
        rows.sort_by(R::order);
        Ok(rows)
    }

    async fn find_one(&self, id: R::Id) -> AppResult<Option<R>> {
        let tables = self.store.tables.read().await;
        Ok(R::rows(&tables).get(&id).cloned())
    }

    async fn exists(&self, predicate: &Predicate<R::Filter>) -> AppResult<bool> {
        let tables = self.store.tables.read().await;
        Ok(R::rows(&tables)
            .values()
            .any(|row| row.visible(&tables, &predicate.scope) && row.matches(&predicate.filter)))
    }

    async fn insert(&self, new: &R::New) -> AppResult<R> {
        let mut tables = self.store.tables.write().await;
        let id = R::make_id(tables.next_id(R::KIND));
        let row = R::create(id, new);
        row.check(&tables)?;
        R::rows_mut(&mut tables).insert(id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: R::Id, changes: &R::Changes) -> AppResult<R> {
        let mut tables = self.store.tables.write().await;
        let row = R::rows(&tables)
            .get(&id)
            .ok_or_else(|| AppError::not_found(R::KIND.not_found_message()))?
            .apply(changes);
        row.check(&tables)?;
        R::rows_mut(&mut tables).insert(id, row.clone());
        Ok(row)
    }

    async fn delete(&self, id: R::Id) -> AppResult<bool> {
        let mut tables = self.store.tables.write().await;
        Ok(R::remove(&mut tables, id))
    }
}
