use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use common::ApiResponse;
use models::WarrantyType;
use service::db::warranty_type_service::{self, CreateWarrantyTypeInput, UpdateWarrantyTypeInput};

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
    get, path = "/warranty-type", tag = "warranty-type",
    responses((status = 200, description = "All warranty types by name"))
)]
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<WarrantyType>> {
    let list = warranty_type_service::list_warranty_types(&state.db).await?;
    Ok(Json(ApiResponse::data(list)))
}

#[utoipa::path(
    get, path = "/warranty-type/{id}", tag = "warranty-type",
    params(("id" = i32, Path, description = "Warranty type id")),
    responses(
        (status = 200, description = "OK", body = WarrantyType),
        (status = 404, description = "Warranty type not found")
    )
)]
pub async fn get_one(State(state): State<AppState>, AppPath(id): AppPath<i32>) -> ApiResult<WarrantyType> {
    Ok(Json(ApiResponse::data(warranty_type_service::get_warranty_type(&state.db, id).await?)))
}

#[utoipa::path(
    post, path = "/warranty-type", tag = "warranty-type",
    request_body = CreateWarrantyTypeInput,
    responses(
        (status = 201, description = "Created", body = WarrantyType),
        (status = 400, description = "Validation error or duplicate type name")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateWarrantyTypeInput>,
) -> Result<(StatusCode, Json<ApiResponse<WarrantyType>>), ApiError> {
    let created = warranty_type_service::create_warranty_type(&state.db, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(created).with_message("Warranty type created successfully")),
    ))
}

#[utoipa::path(
    put, path = "/warranty-type/{id}", tag = "warranty-type",
    params(("id" = i32, Path, description = "Warranty type id")),
    request_body = UpdateWarrantyTypeInput,
    responses(
        (status = 200, description = "Updated", body = WarrantyType),
        (status = 404, description = "Warranty type not found")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(input): AppJson<UpdateWarrantyTypeInput>,
) -> ApiResult<WarrantyType> {
    let updated = warranty_type_service::update_warranty_type(&state.db, id, input).await?;
    Ok(Json(ApiResponse::data(updated).with_message("Warranty type updated successfully")))
}

/// Types still referenced by a warranty cannot be deleted (400).
#[utoipa::path(
    delete, path = "/warranty-type/{id}", tag = "warranty-type",
    params(("id" = i32, Path, description = "Warranty type id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 400, description = "Type still in use"),
        (status = 404, description = "Warranty type not found")
    )
)]
pub async fn remove(State(state): State<AppState>, AppPath(id): AppPath<i32>) -> ApiResult<()> {
    warranty_type_service::delete_warranty_type(&state.db, id).await?;
    Ok(Json(ApiResponse::message("Warranty type deleted successfully")))
}
