//! Milk record handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use farmhub_core::types::MilkRecordId;
use farmhub_entity::production::{
    MilkRecord, MilkRecordChanges, MilkRecordFilter, NewMilkRecord,
};

use crate::dto::{ApiResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::{ApiJson, ApiPath, ApiQuery, AuthUser};
use crate::state::AppState;

/// GET /milk-records?cow_id=&date_from=&date_to=
pub async fn list_milk_records(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(filter): ApiQuery<MilkRecordFilter>,
) -> ApiResult<Json<ApiResponse<Vec<MilkRecord>>>> {
    let records = state.milk_record_service.list(&auth, filter).await?;
    Ok(Json(ApiResponse::ok(records)))
}

/// GET /milk-records/{id}
pub async fn get_milk_record(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<MilkRecordId>,
) -> ApiResult<Json<ApiResponse<MilkRecord>>> {
    let record = state.milk_record_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(record)))
}

/// POST /milk-records
pub async fn create_milk_record(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<NewMilkRecord>,
) -> ApiResult<(StatusCode, Json<ApiResponse<MilkRecord>>)> {
    let record = state.milk_record_service.create(&auth, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Milk record created successfully.",
            record,
        )),
    ))
}

/// PUT|PATCH /milk-records/{id}
pub async fn update_milk_record(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<MilkRecordId>,
    ApiJson(req): ApiJson<MilkRecordChanges>,
) -> ApiResult<Json<ApiResponse<MilkRecord>>> {
    let record = state.milk_record_service.update(&auth, id, req).await?;
    Ok(Json(ApiResponse::with_message(
        "Milk record updated successfully.",
        record,
    )))
}

/// DELETE /milk-records/{id}
pub async fn delete_milk_record(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<MilkRecordId>,
) -> ApiResult<Json<MessageResponse>> {
    state.milk_record_service.delete(&auth, id).await?;
    Ok(Json(MessageResponse::new(
        "Milk record deleted successfully.",
    )))
}
