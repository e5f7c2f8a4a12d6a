//! Per-request time budget.

use std::time::Duration;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tasklist_core::AppError;

use crate::error::HttpAppError;

/// Race the rest of the pipeline against a fixed deadline. On expiry the
/// client gets 408 and the downstream future is dropped, which cancels any
/// in-flight store call instead of letting it run on with a discarded result.
pub async fn time_budget_middleware(
    State(budget): State<Duration>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    match tokio::time::timeout(budget, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(
                method = %method,
                path = %path,
                budget_secs = budget.as_secs(),
                "request exceeded its time budget"
            );
            HttpAppError(AppError::Timeout).into_response()
        }
    }
}
