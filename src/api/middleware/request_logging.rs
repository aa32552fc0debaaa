use axum::{
    extract::Request,
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::value_objects::ExecutionMode;

const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Attached to a response by the reclaim handler so the request log line
/// can be correlated with the `reclaim_pass` span.
#[derive(Debug, Clone, Copy)]
pub struct ReclaimPassTag {
    pub run_id: Uuid,
    pub mode: ExecutionMode,
}

/// Reuse the caller's request ID when it is a usable header value
fn request_id(headers: &HeaderMap) -> HeaderValue {
    headers
        .get(&REQUEST_ID_HEADER)
        .filter(|v| !v.is_empty())
        .cloned()
        .unwrap_or_else(|| {
            HeaderValue::from_str(&Uuid::new_v4().to_string())
                .unwrap_or_else(|_| HeaderValue::from_static("unknown"))
        })
}

/// Logs every request with its duration and echoes the request ID.
///
/// Health checks are logged at debug level. Responses from a reclaim pass
/// carry the pass's run ID and mode in the log line.
pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request_id(request.headers());

    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert(REQUEST_ID_HEADER, request_id.clone());

    let request_id = request_id.to_str().unwrap_or("invalid");
    let status = response.status().as_u16();
    let duration_ms = start.elapsed().as_millis();

    if let Some(tag) = response.extensions().get::<ReclaimPassTag>() {
        info!(
            request_id,
            %method,
            path = %path,
            status,
            duration_ms,
            run_id = %tag.run_id,
            mode = %tag.mode,
            "reclaim_request_completed"
        );
    } else if response.status().is_server_error() {
        warn!(request_id, %method, path = %path, status, duration_ms, "request_completed_with_error");
    } else if path.starts_with("/health") {
        debug!(request_id, %method, path = %path, status, duration_ms, "health_check_completed");
    } else {
        info!(request_id, %method, path = %path, status, duration_ms, "request_completed");
    }

    response
}
