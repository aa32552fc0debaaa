use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::application::reclaim::ReclaimError;

/// API error response
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message,
        }));

        (self.status, body).into_response()
    }
}

impl From<ReclaimError> for ApiError {
    fn from(err: ReclaimError) -> Self {
        match err {
            // Nothing was deleted; the pass can be retried once the store is back
            ReclaimError::ReferenceQuery { .. } => ApiError::service_unavailable(err.to_string()),
        }
    }
}
