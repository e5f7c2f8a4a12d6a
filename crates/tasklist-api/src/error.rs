//! HTTP error response conversion
//!
//! Every non-2xx response uses one body shape. Handlers return
//! `Result<impl IntoResponse, HttpAppError>` and convert domain errors with
//! `?`; the conversion here picks the status, logs at the error's level, and
//! renders the body.

use axum::{
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tasklist_core::{AppError, LogLevel};

/// Standard error body: `{status, message, code, detail}` with
/// `code = "ERR_<status>"`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub message: String,
    pub code: String,
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(status: u16, message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: format!("ERR_{status}"),
            detail: detail.into(),
        }
    }
}

/// Wrapper type for AppError to implement IntoResponse (orphan rule: both
/// IntoResponse and AppError are foreign to each other's crates).
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<tasklist_core::ValidationError> for HttpAppError {
    fn from(err: tasklist_core::ValidationError) -> Self {
        HttpAppError(AppError::Validation(err))
    }
}

/// Convert JSON body deserialization failures into a 400 with the standard
/// error body instead of axum's plain-text rejection.
impl From<JsonRejection> for HttpAppError {
    fn from(rejection: JsonRejection) -> Self {
        HttpAppError(AppError::InvalidInput(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

/// JSON extractor that rejects malformed bodies in the standard error shape.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(inner) = Json::<T>::from_request(req, state)
            .await
            .map_err(HttpAppError::from)?;
        Ok(ValidatedJson(inner))
    }
}

fn log_error(error: &AppError) {
    match error.log_level() {
        LogLevel::Debug => tracing::debug!(error = %error, "request failed"),
        LogLevel::Warn => tracing::warn!(error = %error, "request failed"),
        LogLevel::Error => tracing::error!(error = %error, "request failed"),
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let error = &self.0;
        log_error(error);

        let status = StatusCode::from_u16(error.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorResponse::new(status.as_u16(), error.client_message(), error.detail());

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasklist_core::ValidationError;

    /// Serialized body contract: status, message, code = "ERR_<status>", detail.
    #[test]
    fn test_error_response_shape() {
        let body = ErrorResponse::new(429, "Too many requests", "Retry in 30s");
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(json["status"], 429);
        assert_eq!(json["code"], "ERR_429");
        assert_eq!(json["message"], "Too many requests");
        assert!(json["detail"].is_string());
    }

    #[test]
    fn test_validation_error_becomes_400() {
        let HttpAppError(err) = ValidationError::TitleRequired.into();
        assert_eq!(err.http_status(), 400);
        assert_eq!(err.client_message(), "Title is required");
    }
}
