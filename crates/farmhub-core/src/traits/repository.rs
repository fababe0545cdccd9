//! Abstract data-access contract consumed by the authorization engine and
//! the resource services.

use async_trait::async_trait;
use serde::Serialize;

use crate::result::AppResult;
use crate::types::resource::ResourceKind;
use crate::types::scope::Predicate;

/// A persisted entity that can be stored behind a [`Repository`].
pub trait Resource: Clone + Send + Sync + Serialize + 'static {
    /// Primary key type.
    type Id: Copy + Ord + Send + Sync + std::fmt::Debug + std::fmt::Display + 'static;
    /// Insert payload after authorization and validation.
    type New: Send + Sync + 'static;
    /// Partial update; `None` fields are left unchanged.
    type Changes: Send + Sync + 'static;
    /// Attribute filter applied after the scope.
    type Filter: Default + Clone + Send + Sync + 'static;

    /// Which collection the entity belongs to.
    const KIND: ResourceKind;

    /// A filter matching exactly one primary key.
    fn by_id(id: Self::Id) -> Self::Filter;
}

/// Generic data-access trait, one implementation per entity and backend.
///
/// Inserts and updates fail with
/// [`ErrorKind::ConstraintViolation`](crate::error::ErrorKind::ConstraintViolation)
/// when a uniqueness or foreign-key rule is broken. Each call is atomic.
#[async_trait]
pub trait Repository<R: Resource>: Send + Sync + 'static {
    /// All rows matching the predicate, in the resource's canonical order.
    async fn find(&self, predicate: &Predicate<R::Filter>) -> AppResult<Vec<R>>;

    /// Load by primary key without any scope.
    async fn find_one(&self, id: R::Id) -> AppResult<Option<R>>;

    /// Whether any row matches the predicate.
    async fn exists(&self, predicate: &Predicate<R::Filter>) -> AppResult<bool>;

    /// Insert a new row and return it.
    async fn insert(&self, new: &R::New) -> AppResult<R>;

    /// Apply a partial update and return the updated row.
    async fn update(&self, id: R::Id, changes: &R::Changes) -> AppResult<R>;

    /// Delete by primary key. Returns `true` if a row was removed.
    async fn delete(&self, id: R::Id) -> AppResult<bool>;
}
