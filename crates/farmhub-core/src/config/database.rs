//! Database configuration.

use serde::{Deserialize, Serialize};

/// URL scheme that selects the in-process store instead of PostgreSQL.
pub const MEMORY_URL: &str = "memory://";

/// Database connection pool configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL, or `memory://`.
    #[serde(default = "default_url")]
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// Idle connection timeout in seconds.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,
    /// Apply embedded migrations on startup.
    #[serde(default = "default_true")]
    pub run_migrations: bool,
    /// Insert the demo dataset on startup.
    #[serde(default)]
    pub seed: bool,
}

impl DatabaseConfig {
    /// Whether the in-memory store was requested.
    pub fn is_memory(&self) -> bool {
        self.url.starts_with(MEMORY_URL)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_seconds: default_connect_timeout(),
            idle_timeout_seconds: default_idle_timeout(),
            run_migrations: true,
            seed: false,
        }
    }
}

fn default_url() -> String {
    MEMORY_URL.to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    2
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_idle_timeout() -> u64 {
    300
}

fn default_true() -> bool {
    true
}
