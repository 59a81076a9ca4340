use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use common::ApiResponse;
use models::ServiceContractStatus;
use service::db::contract_status_service::{self, ContractStatusInput};

use super::ApiResult;
use crate::errors::ApiError;
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(get_one).put(update).delete(remove))
}

#[utoipa::path(
    get, path = "/contract-status", tag = "contract-status",
    responses((status = 200, description = "All contract statuses by name"))
)]
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<ServiceContractStatus>> {
    Ok(Json(ApiResponse::data(contract_status_service::list_statuses(&state.db).await?)))
}

#[utoipa::path(
    get, path = "/contract-status/{id}", tag = "contract-status",
    params(("id" = i32, Path, description = "Status id")),
    responses(
        (status = 200, description = "OK", body = ServiceContractStatus),
        (status = 404, description = "Contract status not found")
    )
)]
pub async fn get_one(State(state): State<AppState>, AppPath(id): AppPath<i32>) -> ApiResult<ServiceContractStatus> {
    Ok(Json(ApiResponse::data(contract_status_service::get_status(&state.db, id).await?)))
}

#[utoipa::path(
    post, path = "/contract-status", tag = "contract-status",
    request_body = ContractStatusInput,
    responses(
        (status = 201, description = "Created", body = ServiceContractStatus),
        (status = 400, description = "Validation error or duplicate name")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<ContractStatusInput>,
) -> Result<(StatusCode, Json<ApiResponse<ServiceContractStatus>>), ApiError> {
    let created = contract_status_service::create_status(&state.db, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(created).with_message("Contract status created successfully")),
    ))
}

#[utoipa::path(
    put, path = "/contract-status/{id}", tag = "contract-status",
    params(("id" = i32, Path, description = "Status id")),
    request_body = ContractStatusInput,
    responses(
        (status = 200, description = "Updated", body = ServiceContractStatus),
        (status = 404, description = "Contract status not found")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(input): AppJson<ContractStatusInput>,
) -> ApiResult<ServiceContractStatus> {
    let updated = contract_status_service::update_status(&state.db, id, input).await?;
    Ok(Json(ApiResponse::data(updated).with_message("Contract status updated successfully")))
}

/// Contracts pointing at the status keep existing with `statusId = null`.
#[utoipa::path(
    delete, path = "/contract-status/{id}", tag = "contract-status",
    params(("id" = i32, Path, description = "Status id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Contract status not found")
    )
)]
pub async fn remove(State(state): State<AppState>, AppPath(id): AppPath<i32>) -> ApiResult<()> {
    contract_status_service::delete_status(&state.db, id).await?;
    Ok(Json(ApiResponse::message("Contract status deleted successfully")))
}
