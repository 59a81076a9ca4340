use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use common::ApiResponse;
use models::ServiceRequestItem;
use service::db::service_request_item_service::{
    self, CreateServiceRequestItemInput, ServiceRequestItemListQuery, UpdateServiceRequestItemInput,
};

use super::ApiResult;
use crate::errors::ApiError;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/service-request/:service_request_id", get(by_service_request))
        .route("/:id", get(get_one).put(update).delete(remove))
}

#[utoipa::path(
    get, path = "/service-request-item", tag = "service-request-item",
    params(ServiceRequestItemListQuery),
    responses((status = 200, description = "Paginated line items, newest first"))
)]
pub async fn list(
    State(state): State<AppState>,
    AppQuery(q): AppQuery<ServiceRequestItemListQuery>,
) -> ApiResult<Vec<ServiceRequestItem>> {
    let page = service_request_item_service::list_items(&state.db, &q).await?;
    Ok(Json(ApiResponse::paginated(page.items, page.info)))
}

#[utoipa::path(
    get, path = "/service-request-item/{id}", tag = "service-request-item",
    params(("id" = i32, Path, description = "Item id")),
    responses(
        (status = 200, description = "OK", body = ServiceRequestItem),
        (status = 404, description = "Service request item not found")
    )
)]
pub async fn get_one(State(state): State<AppState>, AppPath(id): AppPath<i32>) -> ApiResult<ServiceRequestItem> {
    Ok(Json(ApiResponse::data(service_request_item_service::get_item(&state.db, id).await?)))
}

/// `partCost` and `labourCost` must be positive; checked before any query runs.
#[utoipa::path(
    post, path = "/service-request-item", tag = "service-request-item",
    request_body = CreateServiceRequestItemInput,
    responses(
        (status = 201, description = "Created", body = ServiceRequestItem),
        (status = 400, description = "Validation error or unknown service request")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateServiceRequestItemInput>,
) -> Result<(StatusCode, Json<ApiResponse<ServiceRequestItem>>), ApiError> {
    let created = service_request_item_service::create_item(&state.db, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(created).with_message("Service request item created successfully")),
    ))
}

#[utoipa::path(
    put, path = "/service-request-item/{id}", tag = "service-request-item",
    params(("id" = i32, Path, description = "Item id")),
    request_body = UpdateServiceRequestItemInput,
    responses(
        (status = 200, description = "Updated", body = ServiceRequestItem),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Service request item not found")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(input): AppJson<UpdateServiceRequestItemInput>,
) -> ApiResult<ServiceRequestItem> {
    let updated = service_request_item_service::update_item(&state.db, id, input).await?;
    Ok(Json(ApiResponse::data(updated).with_message("Service request item updated successfully")))
}

#[utoipa::path(
    delete, path = "/service-request-item/{id}", tag = "service-request-item",
    params(("id" = i32, Path, description = "Item id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Service request item not found")
    )
)]
pub async fn remove(State(state): State<AppState>, AppPath(id): AppPath<i32>) -> ApiResult<()> {
    service_request_item_service::delete_item(&state.db, id).await?;
    Ok(Json(ApiResponse::message("Service request item deleted successfully")))
}

#[utoipa::path(
    get, path = "/service-request-item/service-request/{serviceRequestId}", tag = "service-request-item",
    params(("serviceRequestId" = i32, Path, description = "Parent service request id")),
    responses((status = 200, description = "Items of the service request"))
)]
pub async fn by_service_request(
    State(state): State<AppState>,
    AppPath(service_request_id): AppPath<i32>,
) -> ApiResult<Vec<ServiceRequestItem>> {
    let items = service_request_item_service::list_by_service_request(&state.db, service_request_id).await?;
    Ok(Json(ApiResponse::data(items)))
}
