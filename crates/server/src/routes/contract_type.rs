use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use common::ApiResponse;
use models::ContractType;
use service::db::contract_type_service::{self, CreateContractTypeInput, UpdateContractTypeInput};

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
    get, path = "/contract-type", tag = "contract-type",
    responses((status = 200, description = "All contract types by code"))
)]
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<ContractType>> {
    Ok(Json(ApiResponse::data(contract_type_service::list_contract_types(&state.db).await?)))
}

#[utoipa::path(
    get, path = "/contract-type/{id}", tag = "contract-type",
    params(("id" = i32, Path, description = "Contract type id")),
    responses(
        (status = 200, description = "OK", body = ContractType),
        (status = 404, description = "Contract type not found")
    )
)]
pub async fn get_one(State(state): State<AppState>, AppPath(id): AppPath<i32>) -> ApiResult<ContractType> {
    Ok(Json(ApiResponse::data(contract_type_service::get_contract_type(&state.db, id).await?)))
}

#[utoipa::path(
    post, path = "/contract-type", tag = "contract-type",
    request_body = CreateContractTypeInput,
    responses(
        (status = 201, description = "Created", body = ContractType),
        (status = 400, description = "Validation error or duplicate type code")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateContractTypeInput>,
) -> Result<(StatusCode, Json<ApiResponse<ContractType>>), ApiError> {
    let created = contract_type_service::create_contract_type(&state.db, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(created).with_message("Contract type created successfully")),
    ))
}

#[utoipa::path(
    put, path = "/contract-type/{id}", tag = "contract-type",
    params(("id" = i32, Path, description = "Contract type id")),
    request_body = UpdateContractTypeInput,
    responses(
        (status = 200, description = "Updated", body = ContractType),
        (status = 404, description = "Contract type not found")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(input): AppJson<UpdateContractTypeInput>,
) -> ApiResult<ContractType> {
    let updated = contract_type_service::update_contract_type(&state.db, id, input).await?;
    Ok(Json(ApiResponse::data(updated).with_message("Contract type updated successfully")))
}

#[utoipa::path(
    delete, path = "/contract-type/{id}", tag = "contract-type",
    params(("id" = i32, Path, description = "Contract type id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 400, description = "Type still referenced by a contract"),
        (status = 404, description = "Contract type not found")
    )
)]
pub async fn remove(State(state): State<AppState>, AppPath(id): AppPath<i32>) -> ApiResult<()> {
    contract_type_service::delete_contract_type(&state.db, id).await?;
    Ok(Json(ApiResponse::message("Contract type deleted successfully")))
}
