//! Notification lead-time preferences of consumers and suppliers.
//!
//! `PUT` upserts: 201 when the row was created, 200 when it was updated.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use common::ApiResponse;
use models::{ConsumerPreference, SupplierPreference};
use serde::Serialize;
use service::db::preference_service::{self, PreferenceInput, Upserted};

use super::ApiResult;
use crate::errors::ApiError;
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/consumer/:consumer_id",
            get(get_consumer).put(put_consumer).delete(delete_consumer),
        )
        .route(
            "/supplier/:supplier_id",
            get(get_supplier).put(put_supplier).delete(delete_supplier),
        )
}

fn upserted<T: Serialize>(res: Upserted<T>, what: &str) -> (StatusCode, Json<ApiResponse<T>>) {
    let (status, verb) = if res.created { (StatusCode::CREATED, "created") } else { (StatusCode::OK, "updated") };
    (status, Json(ApiResponse::data(res.record).with_message(format!("{what} {verb} successfully"))))
}

#[utoipa::path(
    get, path = "/preference/consumer/{consumerId}", tag = "preference",
    params(("consumerId" = String, Path, description = "Consumer id")),
    responses(
        (status = 200, description = "OK", body = ConsumerPreference),
        (status = 404, description = "Consumer preference not found")
    )
)]
pub async fn get_consumer(
    State(state): State<AppState>,
    AppPath(consumer_id): AppPath<String>,
) -> ApiResult<ConsumerPreference> {
    let pref = preference_service::get_consumer_preference(&state.db, &consumer_id).await?;
    Ok(Json(ApiResponse::data(pref)))
}

#[utoipa::path(
    put, path = "/preference/consumer/{consumerId}", tag = "preference",
    params(("consumerId" = String, Path, description = "Consumer id")),
    request_body = PreferenceInput,
    responses(
        (status = 200, description = "Updated", body = ConsumerPreference),
        (status = 201, description = "Created", body = ConsumerPreference),
        (status = 400, description = "Validation error")
    )
)]
pub async fn put_consumer(
    State(state): State<AppState>,
    AppPath(consumer_id): AppPath<String>,
    AppJson(input): AppJson<PreferenceInput>,
) -> Result<(StatusCode, Json<ApiResponse<ConsumerPreference>>), ApiError> {
    let res = preference_service::upsert_consumer_preference(&state.db, &consumer_id, input).await?;
    Ok(upserted(res, "Consumer preference"))
}

#[utoipa::path(
    delete, path = "/preference/consumer/{consumerId}", tag = "preference",
    params(("consumerId" = String, Path, description = "Consumer id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Consumer preference not found")
    )
)]
pub async fn delete_consumer(
    State(state): State<AppState>,
    AppPath(consumer_id): AppPath<String>,
) -> ApiResult<()> {
    preference_service::delete_consumer_preference(&state.db, &consumer_id).await?;
    Ok(Json(ApiResponse::message("Consumer preference deleted successfully")))
}

#[utoipa::path(
    get, path = "/preference/supplier/{supplierId}", tag = "preference",
    params(("supplierId" = String, Path, description = "Supplier id")),
    responses(
        (status = 200, description = "OK", body = SupplierPreference),
        (status = 404, description = "Supplier preference not found")
    )
)]
pub async fn get_supplier(
    State(state): State<AppState>,
    AppPath(supplier_id): AppPath<String>,
) -> ApiResult<SupplierPreference> {
    let pref = preference_service::get_supplier_preference(&state.db, &supplier_id).await?;
    Ok(Json(ApiResponse::data(pref)))
}

#[utoipa::path(
    put, path = "/preference/supplier/{supplierId}", tag = "preference",
    params(("supplierId" = String, Path, description = "Supplier id")),
    request_body = PreferenceInput,
    responses(
        (status = 200, description = "Updated", body = SupplierPreference),
        (status = 201, description = "Created", body = SupplierPreference),
        (status = 400, description = "Validation error")
    )
)]
pub async fn put_supplier(
    State(state): State<AppState>,
    AppPath(supplier_id): AppPath<String>,
    AppJson(input): AppJson<PreferenceInput>,
) -> Result<(StatusCode, Json<ApiResponse<SupplierPreference>>), ApiError> {
    let res = preference_service::upsert_supplier_preference(&state.db, &supplier_id, input).await?;
    Ok(upserted(res, "Supplier preference"))
}

#[utoipa::path(
    delete, path = "/preference/supplier/{supplierId}", tag = "preference",
    params(("supplierId" = String, Path, description = "Supplier id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Supplier preference not found")
    )
)]
pub async fn delete_supplier(
    State(state): State<AppState>,
    AppPath(supplier_id): AppPath<String>,
) -> ApiResult<()> {
    preference_service::delete_supplier_preference(&state.db, &supplier_id).await?;
    Ok(Json(ApiResponse::message("Supplier preference deleted successfully")))
}
