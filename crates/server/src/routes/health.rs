//! Liveness, readiness and health probes. Mounted outside the API prefix.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

pub const SERVICE_NAME: &str = "Warranty Service";

#[derive(Debug, Serialize, ToSchema)]
pub struct MemoryUsage {
    pub rss: String,
    #[serde(rename = "virtual")]
    pub virtual_size: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthChecks {
    pub database: String,
    pub memory: MemoryUsage,
    /// seconds
    pub uptime: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub service: String,
    pub version: String,
    pub environment: String,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProbeResponse {
    pub status: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime: Option<f64>,
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Resident and virtual size from `/proc/self/status`, formatted in MB.
fn memory_usage() -> MemoryUsage {
    let status = std::fs::read_to_string("/proc/self/status").unwrap_or_default();
    MemoryUsage {
        rss: proc_field_mb(&status, "VmRSS:"),
        virtual_size: proc_field_mb(&status, "VmSize:"),
    }
}

fn proc_field_mb(status: &str, key: &str) -> String {
    status
        .lines()
        .find_map(|line| line.strip_prefix(key))
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|kb| kb.parse::<f64>().ok())
        .map(|kb| format!("{:.2} MB", kb / 1024.0))
        .unwrap_or_else(|| "unknown".to_string())
}

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let db_ok = match models::db::ping(&state.db).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "health check: database ping failed");
            false
        }
    };
    let db_status = if db_ok { "healthy" } else { "unhealthy" };
    let body = HealthResponse {
        status: db_status.to_string(),
        timestamp: timestamp(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.environment.clone(),
        checks: HealthChecks {
            database: db_status.to_string(),
            memory: memory_usage(),
            uptime: state.uptime_secs(),
        },
    };
    let status = if db_ok { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status, Json(body))
}

#[utoipa::path(
    get, path = "/ready", tag = "health",
    responses(
        (status = 200, description = "Ready to serve", body = ProbeResponse),
        (status = 503, description = "Not ready", body = ProbeResponse)
    )
)]
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ProbeResponse>) {
    match models::db::ping(&state.db).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ProbeResponse { status: "ready".into(), timestamp: timestamp(), reason: None, uptime: None }),
        ),
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ProbeResponse {
                status: "not ready".into(),
                timestamp: timestamp(),
                reason: Some("Database connection failed".into()),
                uptime: None,
            }),
        ),
    }
}

#[utoipa::path(
    get, path = "/live", tag = "health",
    responses((status = 200, description = "Process is alive", body = ProbeResponse))
)]
pub async fn live(State(state): State<AppState>) -> Json<ProbeResponse> {
    Json(ProbeResponse {
        status: "alive".into(),
        timestamp: timestamp(),
        reason: None,
        uptime: Some(state.uptime_secs()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proc_status_fields_are_read_in_megabytes() {
        let status = "Name:\tserver\nVmSize:\t  204800 kB\nVmRSS:\t   10240 kB\n";
        assert_eq!(proc_field_mb(status, "VmRSS:"), "10.00 MB");
        assert_eq!(proc_field_mb(status, "VmSize:"), "200.00 MB");
        assert_eq!(proc_field_mb(status, "VmSwap:"), "unknown");
    }
}
