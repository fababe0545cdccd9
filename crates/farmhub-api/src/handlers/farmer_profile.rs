//! Farmer profile handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use farmhub_core::types::FarmerProfileId;
use farmhub_entity::farm::{
    CreateFarmerProfile, FarmerProfile, FarmerProfileChanges, FarmerProfileFilter,
};

use crate::dto::{ApiResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::{ApiJson, ApiPath, ApiQuery, AuthUser};
use crate::state::AppState;

/// GET /farmer-profiles?farm_id=&user_id=
pub async fn list_profiles(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(filter): ApiQuery<FarmerProfileFilter>,
) -> ApiResult<Json<ApiResponse<Vec<FarmerProfile>>>> {
    let profiles = state.profile_service.list(&auth, filter).await?;
    Ok(Json(ApiResponse::ok(profiles)))
}

/// GET /farmer-profiles/{id}
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<FarmerProfileId>,
) -> ApiResult<Json<ApiResponse<FarmerProfile>>> {
    let profile = state.profile_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(profile)))
}

/// POST /farmer-profiles
pub async fn create_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<CreateFarmerProfile>,
) -> ApiResult<(StatusCode, Json<ApiResponse<FarmerProfile>>)> {
    let profile = state.profile_service.create(&auth, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Farmer profile created successfully.",
            profile,
        )),
    ))
}

/// PUT|PATCH /farmer-profiles/{id}
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<FarmerProfileId>,
    ApiJson(req): ApiJson<FarmerProfileChanges>,
) -> ApiResult<Json<ApiResponse<FarmerProfile>>> {
    let profile = state.profile_service.update(&auth, id, req).await?;
    Ok(Json(ApiResponse::with_message(
        "Farmer profile updated successfully.",
        profile,
    )))
}

/// DELETE /farmer-profiles/{id}
pub async fn delete_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<FarmerProfileId>,
) -> ApiResult<Json<MessageResponse>> {
    state.profile_service.delete(&auth, id).await?;
    Ok(Json(MessageResponse::new(
        "Farmer profile deleted successfully.",
    )))
}
