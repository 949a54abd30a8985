//! Logging middleware
//!
//! Logs every HTTP request with its outcome and latency.

use std::time::Instant;
use axum::{extract::Request, middleware::Next, response::Response};
use tracing::{info, warn, error};

/// Log method, path, status and duration of each request
pub async fn log_requests(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let status = response.status();
    let duration_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        error!(method = %method, path = %path, status = status.as_u16(), duration_ms = duration_ms, "Request failed");
    } else if status.is_client_error() {
        warn!(method = %method, path = %path, status = status.as_u16(), duration_ms = duration_ms, "Request rejected");
    } else {
        info!(method = %method, path = %path, status = status.as_u16(), duration_ms = duration_ms, "Request handled");
    }

    response
}
