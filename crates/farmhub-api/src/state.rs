//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use farmhub_auth::ActorResolver;
use farmhub_core::config::AppConfig;
use farmhub_database::DatabasePool;
use farmhub_service::{
    ActivityService, CowService, FarmService, FarmerProfileService, MilkRecordService,
    UserService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// PostgreSQL pool checked by `/healthz`; `None` on the in-memory store
    pub database: Option<DatabasePool>,

    // ── Auth ─────────────────────────────────────────────────
    /// Turns bearer tokens into actors
    pub resolver: Arc<ActorResolver>,

    // ── Services ─────────────────────────────────────────────
    /// Farm service
    pub farm_service: Arc<FarmService>,
    /// Farmer profile service
    pub profile_service: Arc<FarmerProfileService>,
    /// Cow service
    pub cow_service: Arc<CowService>,
    /// Activity service
    pub activity_service: Arc<ActivityService>,
    /// Milk record service
    pub milk_record_service: Arc<MilkRecordService>,
    /// User account service
    pub user_service: Arc<UserService>,
}

impl AppState {
    /// Attach the PostgreSQL pool so `/healthz` can check it.
    pub fn with_database(mut self, pool: DatabasePool) -> Self {
        self.database = Some(pool);
        self
    }
}
