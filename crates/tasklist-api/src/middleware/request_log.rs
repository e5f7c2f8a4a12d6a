//! Request/response logging.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// Log method, path, status, and latency for every request that passed
/// admission, including ones that are later rejected downstream.
pub async fn request_log_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    tracing::info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        latency_ms = start.elapsed().as_millis() as u64,
        "request completed"
    );

    response
}
