use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use common::ApiResponse;
use models::Warranty;
use service::db::warranty_service::{
    self, CreateWarrantyInput, ExpiringQuery, UpdateWarrantyInput, WarrantyDetail, WarrantyListQuery,
};
use tracing::info;

use super::ApiResult;
use crate::errors::ApiError;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/expiring", get(expiring))
        .route("/asset/:asset_id", get(by_asset))
        .route("/:id", get(get_one).put(update).delete(remove))
}

#[utoipa::path(
    get, path = "/warranty", tag = "warranty",
    params(WarrantyListQuery),
    responses(
        (status = 200, description = "Paginated warranties"),
        (status = 400, description = "Invalid query")
    )
)]
pub async fn list(
    State(state): State<AppState>,
    AppQuery(q): AppQuery<WarrantyListQuery>,
) -> ApiResult<Vec<Warranty>> {
    let page = warranty_service::list_warranties(&state.db, &q).await?;
    Ok(Json(ApiResponse::paginated(page.items, page.info)))
}

#[utoipa::path(
    get, path = "/warranty/{id}", tag = "warranty",
    params(("id" = i32, Path, description = "Warranty id")),
    responses(
        (status = 200, description = "Warranty with its type and notifications", body = WarrantyDetail),
        (status = 404, description = "Warranty not found")
    )
)]
pub async fn get_one(State(state): State<AppState>, AppPath(id): AppPath<i32>) -> ApiResult<WarrantyDetail> {
    let detail = warranty_service::get_warranty(&state.db, id).await?;
    Ok(Json(ApiResponse::data(detail)))
}

#[utoipa::path(
    post, path = "/warranty", tag = "warranty",
    request_body = CreateWarrantyInput,
    responses(
        (status = 201, description = "Created", body = Warranty),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateWarrantyInput>,
) -> Result<(StatusCode, Json<ApiResponse<Warranty>>), ApiError> {
    let created = warranty_service::create_warranty(&state.db, input).await?;
    info!(warranty_id = created.warranty_id, asset_id = %created.asset_id, "warranty created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(created).with_message("Warranty created successfully")),
    ))
}

#[utoipa::path(
    put, path = "/warranty/{id}", tag = "warranty",
    params(("id" = i32, Path, description = "Warranty id")),
    request_body = UpdateWarrantyInput,
    responses(
        (status = 200, description = "Updated", body = Warranty),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Warranty not found")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(input): AppJson<UpdateWarrantyInput>,
) -> ApiResult<Warranty> {
    let updated = warranty_service::update_warranty(&state.db, id, input).await?;
    Ok(Json(ApiResponse::data(updated).with_message("Warranty updated successfully")))
}

#[utoipa::path(
    delete, path = "/warranty/{id}", tag = "warranty",
    params(("id" = i32, Path, description = "Warranty id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Warranty not found")
    )
)]
pub async fn remove(State(state): State<AppState>, AppPath(id): AppPath<i32>) -> ApiResult<()> {
    warranty_service::delete_warranty(&state.db, id).await?;
    info!(warranty_id = id, "warranty deleted");
    Ok(Json(ApiResponse::message("Warranty deleted successfully")))
}

#[utoipa::path(
    get, path = "/warranty/asset/{assetId}", tag = "warranty",
    params(("assetId" = String, Path, description = "Asset id")),
    responses((status = 200, description = "Warranties of the asset, newest first"))
)]
pub async fn by_asset(
    State(state): State<AppState>,
    AppPath(asset_id): AppPath<String>,
) -> ApiResult<Vec<Warranty>> {
    let list = warranty_service::list_by_asset(&state.db, &asset_id).await?;
    Ok(Json(ApiResponse::data(list)))
}

#[utoipa::path(
    get, path = "/warranty/expiring", tag = "warranty",
    params(ExpiringQuery),
    responses(
        (status = 200, description = "Active warranties ending within the window, soonest first"),
        (status = 400, description = "Invalid days")
    )
)]
pub async fn expiring(
    State(state): State<AppState>,
    AppQuery(q): AppQuery<ExpiringQuery>,
) -> ApiResult<Vec<Warranty>> {
    let list = warranty_service::list_expiring(&state.db, &q).await?;
    Ok(Json(ApiResponse::data(list)))
}
