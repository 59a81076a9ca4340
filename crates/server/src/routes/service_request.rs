use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use common::ApiResponse;
use models::ServiceRequest;
use service::db::service_request_service::{
    self, CreateServiceRequestInput, ServiceRequestListQuery, UpdateServiceRequestInput,
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
    get, path = "/service-request", tag = "service-request",
    params(ServiceRequestListQuery),
    responses((status = 200, description = "Paginated service requests, latest service date first"))
)]
pub async fn list(
    State(state): State<AppState>,
    AppQuery(q): AppQuery<ServiceRequestListQuery>,
) -> ApiResult<Vec<ServiceRequest>> {
    let page = service_request_service::list_service_requests(&state.db, &q).await?;
    Ok(Json(ApiResponse::paginated(page.items, page.info)))
}

#[utoipa::path(
    get, path = "/service-request/{id}", tag = "service-request",
    params(("id" = i32, Path, description = "Service request id")),
    responses(
        (status = 200, description = "OK", body = ServiceRequest),
        (status = 404, description = "Service request not found")
    )
)]
pub async fn get_one(State(state): State<AppState>, AppPath(id): AppPath<i32>) -> ApiResult<ServiceRequest> {
    let found = service_request_service::get_service_request(&state.db, id).await?;
    Ok(Json(ApiResponse::data(found)))
}

#[utoipa::path(
    get, path = "/service-request/asset/{assetId}", tag = "service-request",
    params(("assetId" = String, Path, description = "Asset id")),
    responses((status = 200, description = "Service requests of the asset"))
)]
pub async fn by_asset(
    State(state): State<AppState>,
    AppPath(asset_id): AppPath<String>,
) -> ApiResult<Vec<ServiceRequest>> {
    let list = service_request_service::list_by_asset(&state.db, &asset_id).await?;
    Ok(Json(ApiResponse::data(list)))
}

#[utoipa::path(
    post, path = "/service-request", tag = "service-request",
    request_body = CreateServiceRequestInput,
    responses(
        (status = 201, description = "Created", body = ServiceRequest),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateServiceRequestInput>,
) -> Result<(StatusCode, Json<ApiResponse<ServiceRequest>>), ApiError> {
    let created = service_request_service::create_service_request(&state.db, input).await?;
    info!(service_request_id = created.service_request_id, asset_id = %created.asset_id, "service request created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(created).with_message("Service request created successfully")),
    ))
}

#[utoipa::path(
    put, path = "/service-request/{id}", tag = "service-request",
    params(("id" = i32, Path, description = "Service request id")),
    request_body = UpdateServiceRequestInput,
    responses(
        (status = 200, description = "Updated", body = ServiceRequest),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Service request not found")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(input): AppJson<UpdateServiceRequestInput>,
) -> ApiResult<ServiceRequest> {
    let updated = service_request_service::update_service_request(&state.db, id, input).await?;
    Ok(Json(ApiResponse::data(updated).with_message("Service request updated successfully")))
}

/// Line items of the request are removed with it.
#[utoipa::path(
    delete, path = "/service-request/{id}", tag = "service-request",
    params(("id" = i32, Path, description = "Service request id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Service request not found")
    )
)]
pub async fn remove(State(state): State<AppState>, AppPath(id): AppPath<i32>) -> ApiResult<()> {
    service_request_service::delete_service_request(&state.db, id).await?;
    info!(service_request_id = id, "service request deleted");
    Ok(Json(ApiResponse::message("Service request deleted successfully")))
}
