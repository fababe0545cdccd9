//! Application builder: wires services, router and middleware into an Axum app.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use farmhub_auth::{
    ActorResolver, AuthorizationEngine, JwtDecoder, PasswordHasher, PasswordValidator,
};
use farmhub_core::config::AppConfig;
use farmhub_database::Repositories;
use farmhub_service::{
    ActivityService, CowService, FarmService, FarmerProfileService, MilkRecordService,
    UserService,
};

use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the shared state over an already-selected set of repositories.
pub fn build_state(config: AppConfig, repos: Repositories) -> AppState {
    let resolver = Arc::new(ActorResolver::new(
        JwtDecoder::new(&config.auth),
        repos.users.clone(),
    ));
    let password_hasher = Arc::new(PasswordHasher::new());
    let password_validator = Arc::new(PasswordValidator::new(&config.auth));
    let engine = Arc::new(AuthorizationEngine::new(repos));

    AppState {
        resolver,
        farm_service: Arc::new(FarmService::new(Arc::clone(&engine))),
        profile_service: Arc::new(FarmerProfileService::new(Arc::clone(&engine))),
        cow_service: Arc::new(CowService::new(Arc::clone(&engine))),
        activity_service: Arc::new(ActivityService::new(Arc::clone(&engine))),
        milk_record_service: Arc::new(MilkRecordService::new(Arc::clone(&engine))),
        user_service: Arc::new(UserService::new(
            engine,
            password_hasher,
            password_validator,
        )),
        config: Arc::new(config),
        database: None,
    }
}

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                timeout,
            ))
            .layer(axum::middleware::from_fn(request_logging)),
    )
}
