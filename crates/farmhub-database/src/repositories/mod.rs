//! sqlx-backed repositories, one per entity, plus the shared helpers that
//! turn a [`Scope`] into SQL and constraint names into readable errors.

pub mod activity;
pub mod cow;
pub mod farm;
pub mod farmer_profile;
pub mod milk_record;
pub mod user;

use std::sync::Arc;

use sqlx::{PgPool, Postgres, QueryBuilder};

use farmhub_core::error::{AppError, ErrorKind};
use farmhub_core::traits::Repository;
use farmhub_core::types::Scope;
use farmhub_entity::farm::{Farm, FarmerProfile};
use farmhub_entity::livestock::{Activity, Cow};
use farmhub_entity::production::MilkRecord;
use farmhub_entity::user::User;

use crate::memory::{MemoryRepository, MemoryStore};

pub use activity::ActivityRepository;
pub use cow::CowRepository;
pub use farm::FarmRepository;
pub use farmer_profile::FarmerProfileRepository;
pub use milk_record::MilkRecordRepository;
pub use user::UserRepository;

/// One repository per resource, behind the backend-agnostic trait.
#[derive(Clone)]
pub struct Repositories {
    /// User accounts.
    pub users: Arc<dyn Repository<User>>,
    /// Farms.
    pub farms: Arc<dyn Repository<Farm>>,
    /// Farmer profiles.
    pub profiles: Arc<dyn Repository<FarmerProfile>>,
    /// Cows.
    pub cows: Arc<dyn Repository<Cow>>,
    /// Activities.
    pub activities: Arc<dyn Repository<Activity>>,
    /// Milk records.
    pub milk_records: Arc<dyn Repository<MilkRecord>>,
}

impl Repositories {
    /// Repositories over a PostgreSQL pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            farms: Arc::new(FarmRepository::new(pool.clone())),
            profiles: Arc::new(FarmerProfileRepository::new(pool.clone())),
            cows: Arc::new(CowRepository::new(pool.clone())),
            activities: Arc::new(ActivityRepository::new(pool.clone())),
            milk_records: Arc::new(MilkRecordRepository::new(pool)),
        }
    }

    /// Repositories over an in-process store.
    pub fn memory(store: MemoryStore) -> Self {
        Self {
            users: Arc::new(MemoryRepository::<User>::new(store.clone())),
            farms: Arc::new(MemoryRepository::<Farm>::new(store.clone())),
            profiles: Arc::new(MemoryRepository::<FarmerProfile>::new(store.clone())),
            cows: Arc::new(MemoryRepository::<Cow>::new(store.clone())),
            activities: Arc::new(MemoryRepository::<Activity>::new(store.clone())),
            milk_records: Arc::new(MemoryRepository::<MilkRecord>::new(store)),
        }
    }
}

/// SQL fragments expressing a resource's ownership chain.
///
/// Each pair is `(prefix, suffix)` around the bound user id, so
/// `("f.agent_id = ", "")` renders as `f.agent_id = $n`. A resource with
/// no farmer ownership chain leaves `owned` empty and matches nothing.
pub(crate) struct ScopeSql {
    pub managed: (&'static str, &'static str),
    pub owned: Option<(&'static str, &'static str)>,
}

/// Append the scope restriction to a query whose WHERE clause is open.
pub(crate) fn push_scope(qb: &mut QueryBuilder<'_, Postgres>, scope: &Scope, sql: &ScopeSql) {
    match scope {
        Scope::Unrestricted => {}
        Scope::ManagedBy(agent) => {
            qb.push(" AND ")
                .push(sql.managed.0)
                .push_bind(agent.get())
                .push(sql.managed.1);
        }
        Scope::OwnedBy(user) => match sql.owned {
            Some((prefix, suffix)) => {
                qb.push(" AND ")
                    .push(prefix)
                    .push_bind(user.get())
                    .push(suffix);
            }
            None => {
                qb.push(" AND FALSE");
            }
        },
        Scope::Nothing => {
            qb.push(" AND FALSE");
        }
    }
}

/// Map a write error, translating known constraint names into
/// [`ErrorKind::ConstraintViolation`] with a readable message.
pub(crate) fn write_error(
    err: sqlx::Error,
    context: &str,
    known: &[(&str, &str)],
) -> AppError {
    let violated = match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                if let Some((_, message)) = known.iter().find(|(name, _)| *name == constraint) {
                    return AppError::constraint(*message);
                }
            }
            db_err.is_unique_violation() || db_err.is_foreign_key_violation()
        }
        _ => false,
    };
    if violated {
        return AppError::with_source(
            ErrorKind::ConstraintViolation,
            format!("{context}: constraint violated"),
            err,
        );
    }
    AppError::with_source(ErrorKind::Database, context.to_string(), err)
}

/// Map a read error.
pub(crate) fn read_error(err: sqlx::Error, context: &str) -> AppError {
    AppError::with_source(ErrorKind::Database, context.to_string(), err)
}
