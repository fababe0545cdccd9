//! Activity handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use farmhub_core::types::ActivityId;
use farmhub_entity::livestock::{Activity, ActivityChanges, ActivityFilter, NewActivity};

use crate::dto::{ApiResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::{ApiJson, ApiPath, ApiQuery, AuthUser};
use crate::state::AppState;

/// GET /activities?cow_id=&type=
pub async fn list_activities(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(filter): ApiQuery<ActivityFilter>,
) -> ApiResult<Json<ApiResponse<Vec<Activity>>>> {
    let activities = state.activity_service.list(&auth, filter).await?;
    Ok(Json(ApiResponse::ok(activities)))
}

/// GET /activities/{id}
pub async fn get_activity(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<ActivityId>,
) -> ApiResult<Json<ApiResponse<Activity>>> {
    let activity = state.activity_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(activity)))
}

/// POST /activities
pub async fn create_activity(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<NewActivity>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Activity>>)> {
    let activity = state.activity_service.create(&auth, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Activity created successfully.",
            activity,
        )),
    ))
}

/// PUT|PATCH /activities/{id}
pub async fn update_activity(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<ActivityId>,
    ApiJson(req): ApiJson<ActivityChanges>,
) -> ApiResult<Json<ApiResponse<Activity>>> {
    let activity = state.activity_service.update(&auth, id, req).await?;
    Ok(Json(ApiResponse::with_message(
        "Activity updated successfully.",
        activity,
    )))
}

/// DELETE /activities/{id}
pub async fn delete_activity(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<ActivityId>,
) -> ApiResult<Json<MessageResponse>> {
    state.activity_service.delete(&auth, id).await?;
    Ok(Json(MessageResponse::new("Activity deleted successfully.")))
}
