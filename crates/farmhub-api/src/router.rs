//! Route definitions for the FarmHub HTTP API.
//!
//! Every resource collection is served both at the root and under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    routing::get,
};

use crate::handlers;
use crate::state::AppState;

/// Build the Axum router with all routes.
///
/// Middleware is layered on by [`build_app`](crate::app::build_app).
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(handlers::health::health))
        .merge(resource_routes())
        .nest("/api", resource_routes())
        .with_state(state)
}

fn resource_routes() -> Router<AppState> {
    Router::new()
        .merge(farm_routes())
        .merge(farmer_profile_routes())
        .merge(cow_routes())
        .merge(activity_routes())
        .merge(milk_record_routes())
        .merge(user_routes())
}

/// Farm endpoints
fn farm_routes() -> Router<AppState> {
    use handlers::farm::*;

    Router::new()
        .route("/farms", get(list_farms).post(create_farm))
        .route(
            "/farms/{id}",
            get(get_farm)
                .put(update_farm)
                .patch(update_farm)
                .delete(delete_farm),
        )
}

/// Farmer profile endpoints
fn farmer_profile_routes() -> Router<AppState> {
    use handlers::farmer_profile::*;

    Router::new()
        .route("/farmer-profiles", get(list_profiles).post(create_profile))
        .route(
            "/farmer-profiles/{id}",
            get(get_profile)
                .put(update_profile)
                .patch(update_profile)
                .delete(delete_profile),
        )
}

/// Cow endpoints
fn cow_routes() -> Router<AppState> {
    use handlers::cow::*;

    Router::new()
        .route("/cows", get(list_cows).post(create_cow))
        .route(
            "/cows/{id}",
            get(get_cow)
                .put(update_cow)
                .patch(update_cow)
                .delete(delete_cow),
        )
}

/// Activity endpoints
fn activity_routes() -> Router<AppState> {
    use handlers::activity::*;

    Router::new()
        .route("/activities", get(list_activities).post(create_activity))
        .route(
            "/activities/{id}",
            get(get_activity)
                .put(update_activity)
                .patch(update_activity)
                .delete(delete_activity),
        )
}

/// Milk record endpoints
fn milk_record_routes() -> Router<AppState> {
    use handlers::milk_record::*;

    Router::new()
        .route(
            "/milk-records",
            get(list_milk_records).post(create_milk_record),
        )
        .route(
            "/milk-records/{id}",
            get(get_milk_record)
                .put(update_milk_record)
                .patch(update_milk_record)
                .delete(delete_milk_record),
        )
}

/// User endpoints
fn user_routes() -> Router<AppState> {
    use handlers::user::*;

    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user)
                .put(update_user)
                .patch(update_user)
                .delete(delete_user),
        )
}
