use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method};
use axum::response::Redirect;
use axum::routing::get;
use axum::{middleware, Json, Router};
use common::ApiResponse;
use configs::ApiConfig;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa_swagger_ui::SwaggerUi;

use crate::errors::ApiError;
use crate::openapi;
use crate::rate_limit::{self, RateLimiter};
use crate::security;
use crate::state::AppState;

pub mod contract_status;
pub mod contract_type;
pub mod health;
pub mod preference;
pub mod service_contract;
pub mod service_history;
pub mod service_request;
pub mod service_request_item;
pub mod warranty;
pub mod warranty_notification;
pub mod warranty_type;

/// Success envelope or an [`ApiError`].
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

pub const DOCS_UI_PATH: &str = "/api-docs/ui";
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Resource routes, relative to the API prefix.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/warranty", warranty::router())
        .nest("/warranty-type", warranty_type::router())
        .nest("/warranty-notification", warranty_notification::router())
        .nest("/service-contract", service_contract::router())
        .nest("/contract-type", contract_type::router())
        .nest("/contract-status", contract_status::router())
        .nest("/preference", preference::router())
        .nest("/service-request", service_request::router())
        .nest("/service-request-item", service_request_item::router())
        .nest("/service-history", service_history::router())
}

pub async fn route_not_found() -> ApiError {
    ApiError::not_found("Route not found")
}

pub fn build_cors(api: &ApiConfig) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS];
    match api.cors_origins() {
        None => CorsLayer::new().allow_origin(Any).allow_methods(methods).allow_headers(Any),
        Some(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|o| match HeaderValue::from_str(o) {
                    Ok(v) => Some(v),
                    Err(_) => {
                        tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(methods)
                .allow_headers([axum::http::header::CONTENT_TYPE, axum::http::header::AUTHORIZATION])
                .allow_credentials(true)
        }
    }
}

/// Build the full application router.
///
/// Health probes sit outside the prefix and are not rate limited; resource
/// routes and API docs are.
pub fn build_router(state: AppState, limiter: Arc<RateLimiter>) -> Router {
    let api = &state.config.api;
    let prefix = api.prefix.trim_end_matches('/').to_string();
    let body_limit = api.body_limit_bytes;
    let cors = build_cors(api);

    let docs = SwaggerUi::new(DOCS_UI_PATH).url(OPENAPI_JSON_PATH, openapi::openapi(&prefix));

    let resources = if prefix.is_empty() {
        api_routes()
    } else {
        Router::new().nest(&prefix, api_routes())
    };
    let limited = resources
        .merge(docs)
        .route("/api-docs", get(|| async { Redirect::temporary("/api-docs/ui/") }))
        .route_layer(middleware::from_fn_with_state(limiter, rate_limit::rate_limit));

    let probes = Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/live", get(health::live));

    let app = probes
        .merge(limited)
        .fallback(route_not_found)
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(cors);

    security::with_security_headers(app).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
            .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
    )
}
