//! Request logging middleware.
//!
//! Logs every HTTP request with method, path, status code, and latency.
//! Headers are never logged since they carry session tokens.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, warn};

/// Logging middleware. 401/403 are surfaced at WARN as auth rejections,
/// 5xx as failures, everything else at INFO.
pub async fn request_logging_simple(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    // Skip logging for health checks
    if path == "/health" {
        return next.run(request).await;
    }

    let start = Instant::now();
    let response = next.run(request).await;
    let latency_ms = start.elapsed().as_millis() as u64;
    let status = response.status();

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            latency_ms,
            "🚫 Auth rejected"
        ),
        s if s.is_server_error() => warn!(
            method = %method,
            path = %path,
            status = s.as_u16(),
            latency_ms,
            "Request failed (5xx)"
        ),
        s => info!(
            method = %method,
            path = %path,
            status = s.as_u16(),
            latency_ms,
            "Request completed"
        ),
    }

    response
}
