//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /healthz
///
/// Answers 503 when the PostgreSQL pool cannot run `SELECT 1`.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let Some(pool) = &state.database else {
        return (StatusCode::OK, Json(report("ok", "memory")));
    };

    match pool.health_check().await {
        Ok(()) => (StatusCode::OK, Json(report("ok", "connected"))),
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(report("unavailable", "unreachable")),
            )
        }
    }
}

fn report(status: &str, database: &str) -> HealthResponse {
    HealthResponse {
        status: status.to_string(),
        database: database.to_string(),
    }
}
