use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tasklist_core::AppError;

use super::AuthState;
use crate::error::HttpAppError;

/// Reject requests without an Authorization header, then hand the token to
/// the configured verifier. Runs after CORS so 401 responses still carry the
/// CORS headers.
pub async fn auth_middleware(
    State(auth): State<Arc<AuthState>>,
    request: Request,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let Some(raw) = header else {
        return HttpAppError(AppError::AuthMissing).into_response();
    };

    let token = raw.strip_prefix("Bearer ").unwrap_or(raw);
    if let Err(err) = auth.verifier.verify(token) {
        return HttpAppError(err).into_response();
    }

    next.run(request).await
}
