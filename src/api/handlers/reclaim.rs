use axum::{extract::State, response::Json, Extension};
use tracing::info;

use crate::api::errors::ApiError;
use crate::api::middleware::request_logging::ReclaimPassTag;
use crate::api::router::AppState;
use crate::application::dto::ReclaimRequest;
use crate::application::reclaim::{ReclaimStatistics, ReconciliationReport};

/// POST /v1/attachments/reclaim
/// Run one reclamation pass. Without `commit: true` nothing is deleted.
#[utoipa::path(
    post,
    path = "/v1/attachments/reclaim",
    tag = "reclaim",
    request_body = ReclaimRequest,
    responses(
        (status = 200, description = "Pass completed", body = ReconciliationReport),
        (status = 401, description = "Authentication required"),
        (status = 503, description = "Reference store unavailable; nothing was deleted")
    )
)]
pub async fn reclaim_handler(
    State(state): State<AppState>,
    Json(request): Json<ReclaimRequest>,
) -> Result<(Extension<ReclaimPassTag>, Json<ReconciliationReport>), ApiError> {
    info!(mode = %request.mode(), "Reclaim pass requested");

    let report = state.reclaim_use_case.execute(&request).await?;
    let tag = ReclaimPassTag {
        run_id: report.run_id,
        mode: report.mode,
    };
    Ok((Extension(tag), Json(report)))
}

/// GET /v1/attachments/reclaim/stats
/// Statistics accumulated since the service started
#[utoipa::path(
    get,
    path = "/v1/attachments/reclaim/stats",
    tag = "reclaim",
    responses(
        (status = 200, description = "Cumulative statistics", body = ReclaimStatistics),
        (status = 401, description = "Authentication required")
    )
)]
pub async fn reclaim_stats_handler(State(state): State<AppState>) -> Json<ReclaimStatistics> {
    Json(state.reclaim_use_case.statistics())
}
