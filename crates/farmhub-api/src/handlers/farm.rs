//! Farm CRUD handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use farmhub_core::types::FarmId;
use farmhub_entity::farm::{Farm, FarmChanges, FarmFilter, NewFarm};

use crate::dto::{ApiResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::{ApiJson, ApiPath, AuthUser};
use crate::state::AppState;

/// GET /farms
pub async fn list_farms(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<Farm>>>> {
    let farms = state
        .farm_service
        .list(&auth, FarmFilter::default())
        .await?;
    Ok(Json(ApiResponse::ok(farms)))
}

/// GET /farms/{id}
pub async fn get_farm(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<FarmId>,
) -> ApiResult<Json<ApiResponse<Farm>>> {
    let farm = state.farm_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(farm)))
}

/// POST /farms
pub async fn create_farm(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<NewFarm>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Farm>>)> {
    let farm = state.farm_service.create(&auth, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Farm created successfully.", farm)),
    ))
}

/// PUT|PATCH /farms/{id}
pub async fn update_farm(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<FarmId>,
    ApiJson(req): ApiJson<FarmChanges>,
) -> ApiResult<Json<ApiResponse<Farm>>> {
    let farm = state.farm_service.update(&auth, id, req).await?;
    Ok(Json(ApiResponse::with_message(
        "Farm updated successfully.",
        farm,
    )))
}

/// DELETE /farms/{id}
pub async fn delete_farm(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<FarmId>,
) -> ApiResult<Json<MessageResponse>> {
    state.farm_service.delete(&auth, id).await?;
    Ok(Json(MessageResponse::new("Farm deleted successfully.")))
}
