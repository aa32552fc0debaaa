use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers::health::{HealthResponse, ReadinessResponse};
use crate::application::dto::ReclaimRequest;
use crate::application::reclaim::{ReclaimStatistics, ReconciliationReport};
use crate::domain::value_objects::{ExecutionMode, PathMatching};

/// OpenAPI specification for the attachment reclaim API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attachment Reclaim API",
        version = "1.0.0",
        description = "Finds attachment files no message part references and disposes of them"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        crate::api::handlers::health::health_handler,
        crate::api::handlers::health::readiness_handler,
        crate::api::handlers::reclaim::reclaim_handler,
        crate::api::handlers::reclaim::reclaim_stats_handler,
    ),
    components(
        schemas(
            HealthResponse,
            ReadinessResponse,
            ReclaimRequest,
            ReconciliationReport,
            ReclaimStatistics,
            ExecutionMode,
            PathMatching,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "reclaim", description = "Orphaned attachment reclamation")
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI route
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_reclaim_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/v1/attachments/reclaim"));
        assert!(doc.paths.paths.contains_key("/v1/attachments/reclaim/stats"));
        assert!(doc.paths.paths.contains_key("/health/ready"));
    }
}
