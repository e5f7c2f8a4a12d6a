//! Activity logging for requests that cleared the auth gate.

use axum::{extract::Request, middleware::Next, response::Response};

pub async fn activity_log_middleware(request: Request, next: Next) -> Response {
    tracing::info!(
        method = %request.method(),
        path = %request.uri().path(),
        "user activity"
    );
    next.run(request).await
}
