use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use common::ApiResponse;
use models::WarrantyNotification;
use service::db::warranty_notification_service::{
    self, CreateNotificationInput, NotificationListQuery, UpdateNotificationInput,
};

use super::ApiResult;
use crate::errors::ApiError;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/warranty/:warranty_id", get(by_warranty))
        .route("/:id", get(get_one).put(update).delete(remove))
}

#[utoipa::path(
    get, path = "/warranty-notification", tag = "warranty-notification",
    params(NotificationListQuery),
    responses((status = 200, description = "Paginated notifications, newest first"))
)]
pub async fn list(
    State(state): State<AppState>,
    AppQuery(q): AppQuery<NotificationListQuery>,
) -> ApiResult<Vec<WarrantyNotification>> {
    let page = warranty_notification_service::list_notifications(&state.db, &q).await?;
    Ok(Json(ApiResponse::paginated(page.items, page.info)))
}

#[utoipa::path(
    get, path = "/warranty-notification/{id}", tag = "warranty-notification",
    params(("id" = i32, Path, description = "Notification id")),
    responses(
        (status = 200, description = "OK", body = WarrantyNotification),
        (status = 404, description = "Warranty notification not found")
    )
)]
pub async fn get_one(State(state): State<AppState>, AppPath(id): AppPath<i32>) -> ApiResult<WarrantyNotification> {
    let n = warranty_notification_service::get_notification(&state.db, id).await?;
    Ok(Json(ApiResponse::data(n)))
}

/// The referenced warranty must exist; otherwise the FK rejects the insert (400).
#[utoipa::path(
    post, path = "/warranty-notification", tag = "warranty-notification",
    request_body = CreateNotificationInput,
    responses(
        (status = 201, description = "Created", body = WarrantyNotification),
        (status = 400, description = "Validation error or unknown warranty")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateNotificationInput>,
) -> Result<(StatusCode, Json<ApiResponse<WarrantyNotification>>), ApiError> {
    let created = warranty_notification_service::create_notification(&state.db, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(created).with_message("Warranty notification created successfully")),
    ))
}

#[utoipa::path(
    put, path = "/warranty-notification/{id}", tag = "warranty-notification",
    params(("id" = i32, Path, description = "Notification id")),
    request_body = UpdateNotificationInput,
    responses(
        (status = 200, description = "Updated", body = WarrantyNotification),
        (status = 404, description = "Warranty notification not found")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(input): AppJson<UpdateNotificationInput>,
) -> ApiResult<WarrantyNotification> {
    let updated = warranty_notification_service::update_notification(&state.db, id, input).await?;
    Ok(Json(ApiResponse::data(updated).with_message("Warranty notification updated successfully")))
}

#[utoipa::path(
    delete, path = "/warranty-notification/{id}", tag = "warranty-notification",
    params(("id" = i32, Path, description = "Notification id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Warranty notification not found")
    )
)]
pub async fn remove(State(state): State<AppState>, AppPath(id): AppPath<i32>) -> ApiResult<()> {
    warranty_notification_service::delete_notification(&state.db, id).await?;
    Ok(Json(ApiResponse::message("Warranty notification deleted successfully")))
}

#[utoipa::path(
    get, path = "/warranty-notification/warranty/{warrantyId}", tag = "warranty-notification",
    params(("warrantyId" = i32, Path, description = "Warranty id")),
    responses((status = 200, description = "Notifications of the warranty"))
)]
pub async fn by_warranty(
    State(state): State<AppState>,
    AppPath(warranty_id): AppPath<i32>,
) -> ApiResult<Vec<WarrantyNotification>> {
    let list = warranty_notification_service::list_by_warranty(&state.db, warranty_id).await?;
    Ok(Json(ApiResponse::data(list)))
}
