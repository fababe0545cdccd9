//! Cow handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use farmhub_core::types::CowId;
use farmhub_entity::livestock::{Cow, CowChanges, CowFilter, CreateCow};

use crate::dto::{ApiResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::{ApiJson, ApiPath, ApiQuery, AuthUser};
use crate::state::AppState;

/// GET /cows?farm_id=&owner_id=
pub async fn list_cows(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(filter): ApiQuery<CowFilter>,
) -> ApiResult<Json<ApiResponse<Vec<Cow>>>> {
    let cows = state.cow_service.list(&auth, filter).await?;
    Ok(Json(ApiResponse::ok(cows)))
}

/// GET /cows/{id}
pub async fn get_cow(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<CowId>,
) -> ApiResult<Json<ApiResponse<Cow>>> {
    let cow = state.cow_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(cow)))
}

/// POST /cows
pub async fn create_cow(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<CreateCow>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Cow>>)> {
    let cow = state.cow_service.create(&auth, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Cow created successfully.", cow)),
    ))
}

/// PUT|PATCH /cows/{id}
pub async fn update_cow(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<CowId>,
    ApiJson(req): ApiJson<CowChanges>,
) -> ApiResult<Json<ApiResponse<Cow>>> {
    let cow = state.cow_service.update(&auth, id, req).await?;
    Ok(Json(ApiResponse::with_message("Cow updated successfully.", cow)))
}

/// DELETE /cows/{id}
pub async fn delete_cow(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<CowId>,
) -> ApiResult<Json<MessageResponse>> {
    state.cow_service.delete(&auth, id).await?;
    Ok(Json(MessageResponse::new("Cow deleted successfully.")))
}
