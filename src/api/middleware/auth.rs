use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Admin API keys accepted on the `/v1` routes
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    api_keys: Vec<String>,
    disabled: bool,
}

impl AuthConfig {
    pub fn new(api_keys: Vec<String>, disabled: bool) -> Self {
        Self { api_keys, disabled }
    }

    fn accepts(&self, api_key: &str) -> bool {
        // No keys configured means nothing is accepted
        self.api_keys.iter().any(|k| k == api_key)
    }
}

/// Authentication middleware for admin API keys (`Authorization: ApiKey <key>`)
pub async fn auth_middleware(
    State(auth): State<Arc<AuthConfig>>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // Only the admin routes are protected
    if !request.uri().path().starts_with("/v1/") {
        return Ok(next.run(request).await);
    }

    if auth.disabled {
        return Ok(next.run(request).await);
    }

    let api_key = headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("ApiKey "))
        .ok_or(StatusCode::UNAUTHORIZED)?;

    if auth.accepts(api_key.trim()) {
        Ok(next.run(request).await)
    } else {
        Err(StatusCode::UNAUTHORIZED)
    }
}
