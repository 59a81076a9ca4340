use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use common::ApiResponse;
use models::ServiceHistory;
use service::db::service_history_service::{
    self, CreateServiceHistoryInput, ServiceHistoryListQuery, UpdateServiceHistoryInput,
};
use tracing::info;

use super::ApiResult;
use crate::errors::ApiError;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/asset/:asset_id", get(by_asset))
        .route("/:id", get(get_one).put(update).delete(remove))
}

#[utoipa::path(
    get, path = "/service-history", tag = "service-history",
    params(ServiceHistoryListQuery),
    responses((status = 200, description = "Paginated service history, latest service date first"))
)]
pub async fn list(
    State(state): State<AppState>,
    AppQuery(q): AppQuery<ServiceHistoryListQuery>,
) -> ApiResult<Vec<ServiceHistory>> {
    let page = service_history_service::list_service_history(&state.db, &q).await?;
    Ok(Json(ApiResponse::paginated(page.items, page.info)))
}

#[utoipa::path(
    get, path = "/service-history/{id}", tag = "service-history",
    params(("id" = i32, Path, description = "Service history id")),
    responses(
        (status = 200, description = "OK", body = ServiceHistory),
        (status = 404, description = "Service history record not found")
    )
)]
pub async fn get_one(State(state): State<AppState>, AppPath(id): AppPath<i32>) -> ApiResult<ServiceHistory> {
    let found = service_history_service::get_service_history(&state.db, id).await?;
    Ok(Json(ApiResponse::data(found)))
}

#[utoipa::path(
    get, path = "/service-history/asset/{assetId}", tag = "service-history",
    params(("assetId" = String, Path, description = "Asset id")),
    responses((status = 200, description = "Service history of the asset"))
)]
pub async fn by_asset(
    State(state): State<AppState>,
    AppPath(asset_id): AppPath<String>,
) -> ApiResult<Vec<ServiceHistory>> {
    let list = service_history_service::list_by_asset(&state.db, &asset_id).await?;
    Ok(Json(ApiResponse::data(list)))
}

#[utoipa::path(
    post, path = "/service-history", tag = "service-history",
    request_body = CreateServiceHistoryInput,
    responses(
        (status = 201, description = "Created", body = ServiceHistory),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateServiceHistoryInput>,
) -> Result<(StatusCode, Json<ApiResponse<ServiceHistory>>), ApiError> {
    let created = service_history_service::create_service_history(&state.db, input).await?;
    info!(service_history_id = created.service_history_id, asset_id = %created.asset_id, "service history recorded");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(created).with_message("Service history created successfully")),
    ))
}

#[utoipa::path(
    put, path = "/service-history/{id}", tag = "service-history",
    params(("id" = i32, Path, description = "Service history id")),
    request_body = UpdateServiceHistoryInput,
    responses(
        (status = 200, description = "Updated", body = ServiceHistory),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Service history record not found")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(input): AppJson<UpdateServiceHistoryInput>,
) -> ApiResult<ServiceHistory> {
    let updated = service_history_service::update_service_history(&state.db, id, input).await?;
    Ok(Json(ApiResponse::data(updated).with_message("Service history updated successfully")))
}

#[utoipa::path(
    delete, path = "/service-history/{id}", tag = "service-history",
    params(("id" = i32, Path, description = "Service history id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Service history record not found")
    )
)]
pub async fn remove(State(state): State<AppState>, AppPath(id): AppPath<i32>) -> ApiResult<()> {
    service_history_service::delete_service_history(&state.db, id).await?;
    Ok(Json(ApiResponse::message("Service history deleted successfully")))
}
