use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;

use crate::api::handlers::{
    health_handler, readiness_handler, reclaim_handler, reclaim_stats_handler,
};
use crate::api::middleware::{auth, request_logging};
use crate::api::openapi::swagger_ui;
use crate::application::ports::{AttachmentDirectory, ReferenceStore};
use crate::application::use_cases::ReclaimAttachmentsUseCase;

/// Application state container
#[derive(Clone)]
pub struct AppState {
    pub reference_store: Arc<dyn ReferenceStore>,
    pub directory: Arc<dyn AttachmentDirectory>,
    pub reclaim_use_case: Arc<ReclaimAttachmentsUseCase>,
    pub auth: Arc<auth::AuthConfig>,
}

/// Create router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let auth_config = Arc::clone(&state.auth);

    Router::new()
        // Health check (no auth required)
        .route("/health", get(health_handler))
        .route("/health/ready", get(readiness_handler))
        // Protected API routes
        .route("/v1/attachments/reclaim", post(reclaim_handler))
        .route("/v1/attachments/reclaim/stats", get(reclaim_stats_handler))
        .with_state(state)
        .merge(swagger_ui())
        // Logging wraps auth so rejected requests are logged too
        .layer(
            ServiceBuilder::new()
                .layer(axum_middleware::from_fn(
                    request_logging::request_logging_middleware,
                ))
                .layer(axum_middleware::from_fn_with_state(
                    auth_config,
                    auth::auth_middleware,
                )),
        )
}
