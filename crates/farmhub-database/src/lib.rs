//! # farmhub-database
//!
//! PostgreSQL connection management, migrations, and the two
//! implementations of the [`Repository`](farmhub_core::traits::Repository)
//! contract: sqlx-backed repositories and an in-process store used for
//! development and tests.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use repositories::Repositories;
