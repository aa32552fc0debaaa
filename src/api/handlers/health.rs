use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::json;
use std::time::{Duration, Instant};
use utoipa::ToSchema;

use crate::api::router::AppState;

const READINESS_TIMEOUT: Duration = Duration::from_secs(2);

/// Basic health check response
#[derive(serde::Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Readiness response
#[derive(serde::Serialize, ToSchema)]
pub struct ReadinessResponse {
    pub status: String,
    pub database: String,
    pub attachment_dir: String,
    pub response_time_ms: u128,
}

/// GET /health
/// Basic health check endpoint (no database check)
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_handler() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            service: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// GET /health/ready
/// Readiness check: the reference store answers and the attachment directory resolves
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    responses(
        (status = 200, description = "Service is ready", body = ReadinessResponse),
        (status = 503, description = "Service is not ready", body = ReadinessResponse)
    )
)]
pub async fn readiness_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let start_time = Instant::now();

    let database = match tokio::time::timeout(READINESS_TIMEOUT, state.reference_store.ping()).await
    {
        Ok(Ok(())) => "connected",
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Readiness: reference store unavailable");
            "disconnected"
        }
        Err(_) => "timeout",
    };

    let attachment_dir = match state.directory.canonical_root().await {
        Ok(_) => "available",
        // A missing directory is a valid state: passes report zero blobs
        Err(e) if e.is_not_found() => "missing",
        Err(e) => {
            tracing::warn!(error = %e, "Readiness: attachment directory unreadable");
            "unreadable"
        }
    };

    let ready = database == "connected" && attachment_dir != "unreadable";
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ReadinessResponse {
            status: if ready { "ready" } else { "not_ready" }.to_string(),
            database: database.to_string(),
            attachment_dir: attachment_dir.to_string(),
            response_time_ms: start_time.elapsed().as_millis(),
        }),
    )
}
