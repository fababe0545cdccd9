//! User account handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use farmhub_core::types::UserId;
use farmhub_entity::user::{CreateUser, UpdateUser, User, UserFilter};

use crate::dto::{ApiResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::{ApiJson, ApiPath, ApiQuery, AuthUser};
use crate::state::AppState;

/// GET /users?role=&username=
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(filter): ApiQuery<UserFilter>,
) -> ApiResult<Json<ApiResponse<Vec<User>>>> {
    let users = state.user_service.list(&auth, filter).await?;
    Ok(Json(ApiResponse::ok(users)))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<UserId>,
) -> ApiResult<Json<ApiResponse<User>>> {
    let user = state.user_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<CreateUser>,
) -> ApiResult<(StatusCode, Json<ApiResponse<User>>)> {
    let user = state.user_service.create(&auth, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("User created successfully.", user)),
    ))
}

/// PUT|PATCH /users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<UserId>,
    ApiJson(req): ApiJson<UpdateUser>,
) -> ApiResult<Json<ApiResponse<User>>> {
    let user = state.user_service.update(&auth, id, req).await?;
    Ok(Json(ApiResponse::with_message(
        "User updated successfully.",
        user,
    )))
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<UserId>,
) -> ApiResult<Json<MessageResponse>> {
    state.user_service.delete(&auth, id).await?;
    Ok(Json(MessageResponse::new("User deleted successfully.")))
}
