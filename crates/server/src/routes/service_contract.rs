use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use common::ApiResponse;
use models::ServiceContract;
use service::db::service_contract_service::{
    self, CreateServiceContractInput, ServiceContractListQuery, UpdateServiceContractInput,
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
    get, path = "/service-contract", tag = "service-contract",
    params(ServiceContractListQuery),
    responses(
        (status = 200, description = "Paginated contracts, newest first"),
        (status = 400, description = "Invalid query")
    )
)]
pub async fn list(
    State(state): State<AppState>,
    AppQuery(q): AppQuery<ServiceContractListQuery>,
) -> ApiResult<Vec<ServiceContract>> {
    let page = service_contract_service::list_contracts(&state.db, &q).await?;
    Ok(Json(ApiResponse::paginated(page.items, page.info)))
}

#[utoipa::path(
    get, path = "/service-contract/{id}", tag = "service-contract",
    params(("id" = i32, Path, description = "Contract id")),
    responses(
        (status = 200, description = "OK", body = ServiceContract),
        (status = 404, description = "Service contract not found")
    )
)]
pub async fn get_one(State(state): State<AppState>, AppPath(id): AppPath<i32>) -> ApiResult<ServiceContract> {
    Ok(Json(ApiResponse::data(service_contract_service::get_contract(&state.db, id).await?)))
}

#[utoipa::path(
    post, path = "/service-contract", tag = "service-contract",
    request_body = CreateServiceContractInput,
    responses(
        (status = 201, description = "Created", body = ServiceContract),
        (status = 400, description = "Validation error, duplicate number or unknown type/status")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateServiceContractInput>,
) -> Result<(StatusCode, Json<ApiResponse<ServiceContract>>), ApiError> {
    let created = service_contract_service::create_contract(&state.db, input).await?;
    info!(contract_id = created.contract_id, contract_number = %created.contract_number, "service contract created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(created).with_message("Service contract created successfully")),
    ))
}

#[utoipa::path(
    put, path = "/service-contract/{id}", tag = "service-contract",
    params(("id" = i32, Path, description = "Contract id")),
    request_body = UpdateServiceContractInput,
    responses(
        (status = 200, description = "Updated", body = ServiceContract),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Service contract not found")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(input): AppJson<UpdateServiceContractInput>,
) -> ApiResult<ServiceContract> {
    let updated = service_contract_service::update_contract(&state.db, id, input).await?;
    Ok(Json(ApiResponse::data(updated).with_message("Service contract updated successfully")))
}

#[utoipa::path(
    delete, path = "/service-contract/{id}", tag = "service-contract",
    params(("id" = i32, Path, description = "Contract id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Service contract not found")
    )
)]
pub async fn remove(State(state): State<AppState>, AppPath(id): AppPath<i32>) -> ApiResult<()> {
    service_contract_service::delete_contract(&state.db, id).await?;
    info!(contract_id = id, "service contract deleted");
    Ok(Json(ApiResponse::message("Service contract deleted successfully")))
}

#[utoipa::path(
    get, path = "/service-contract/asset/{assetId}", tag = "service-contract",
    params(("assetId" = String, Path, description = "Asset id")),
    responses((status = 200, description = "Contracts covering the asset"))
)]
pub async fn by_asset(
    State(state): State<AppState>,
    AppPath(asset_id): AppPath<String>,
) -> ApiResult<Vec<ServiceContract>> {
    Ok(Json(ApiResponse::data(service_contract_service::list_by_asset(&state.db, &asset_id).await?)))
}
