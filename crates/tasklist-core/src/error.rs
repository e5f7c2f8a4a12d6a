//! Error types module
//!
//! All failures are unified under the `AppError` enum, which carries enough
//! metadata (HTTP status, client-safe message, log level) for the API layer
//! to render the standard error body without matching on variants itself.
//!
//! Transport failures keep the driver error as `#[source]` so logs retain the
//! full chain, while `client_message` stays generic and never leaks it.

use crate::validation::ValidationError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected errors such as validation failures
    Debug,
    /// Recoverable issues such as rate limiting or timeouts
    Warn,
    /// Unexpected failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Startup-only: connecting to the database failed on every attempt.
    #[error("failed to connect to database after {attempts} attempts")]
    Connection {
        attempts: u32,
        #[source]
        source: mongodb::error::Error,
    },

    #[error("database query failed: {0}")]
    Query(#[source] mongodb::error::Error),

    #[error("database insert failed: {0}")]
    Insert(#[source] mongodb::error::Error),

    #[error("database update failed: {0}")]
    Update(#[source] mongodb::error::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("malformed identifier: {0}")]
    MalformedId(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no authorization token provided")]
    AuthMissing,

    #[error("rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("request exceeded its time budget")]
    Timeout,

    #[error("token signing failed: {0}")]
    Signing(String),

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("email delivery failed: {0}")]
    EmailSend(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status code to return for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            AppError::Validation(_)
            | AppError::MalformedId(_)
            | AppError::InvalidInput(_) => 400,
            AppError::AuthMissing => 401,
            AppError::NotFound(_) => 404,
            AppError::Timeout => 408,
            AppError::RateLimited { .. } => 429,
            AppError::Connection { .. }
            | AppError::Query(_)
            | AppError::Insert(_)
            | AppError::Update(_)
            | AppError::Signing(_)
            | AppError::Hashing(_)
            | AppError::EmailSend(_)
            | AppError::Internal(_) => 500,
        }
    }

    /// Client-facing message. Transport failures collapse to a generic
    /// operation-failed message; the detailed chain only goes to the logs.
    pub fn client_message(&self) -> String {
        match self {
            AppError::Connection { attempts, .. } => {
                format!("failed to connect to database after {attempts} attempts")
            }
            AppError::Query(_) => "Database query failed".to_string(),
            AppError::Insert(_) => "Failed to add record".to_string(),
            AppError::Update(_) => "Failed to update record".to_string(),
            AppError::Validation(err) => err.to_string(),
            AppError::MalformedId(_) => "Invalid id".to_string(),
            AppError::NotFound(what) => format!("{what} not found"),
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::AuthMissing => "No authorization token provided".to_string(),
            AppError::RateLimited { .. } => "Too many requests".to_string(),
            AppError::Timeout => "Request timeout".to_string(),
            AppError::Signing(_) => "Failed to generate token".to_string(),
            AppError::Hashing(_) => "Failed to hash password".to_string(),
            AppError::EmailSend(_) => "Failed to send password reset email".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }

    /// Additional client-safe context for the error body's `detail` field.
    pub fn detail(&self) -> String {
        match self {
            AppError::Validation(_) | AppError::InvalidInput(_) => {
                "Check the request payload and try again".to_string()
            }
            AppError::MalformedId(id) => {
                format!("'{id}' is not a valid object id")
            }
            AppError::NotFound(_) => "No record matches the given id".to_string(),
            AppError::AuthMissing => {
                "Send a bearer token in the Authorization header".to_string()
            }
            AppError::RateLimited { retry_after_secs } => {
                format!("Rate limit exceeded, retry in {retry_after_secs}s")
            }
            AppError::Timeout => "The request did not complete in time".to_string(),
            _ => "The operation could not be completed".to_string(),
        }
    }

    pub fn log_level(&self) -> LogLevel {
        match self {
            AppError::Validation(_)
            | AppError::MalformedId(_)
            | AppError::InvalidInput(_)
            | AppError::NotFound(_)
            | AppError::AuthMissing => LogLevel::Debug,
            AppError::RateLimited { .. } | AppError::Timeout => LogLevel::Warn,
            _ => LogLevel::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationError;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::Validation(ValidationError::TitleRequired).http_status(),
            400
        );
        assert_eq!(AppError::MalformedId("xyz".into()).http_status(), 400);
        assert_eq!(AppError::AuthMissing.http_status(), 401);
        assert_eq!(AppError::NotFound("todo".into()).http_status(), 404);
        assert_eq!(AppError::Timeout.http_status(), 408);
        assert_eq!(
            AppError::RateLimited { retry_after_secs: 30 }.http_status(),
            429
        );
        assert_eq!(AppError::Signing("boom".into()).http_status(), 500);
    }

    #[test]
    fn test_transport_errors_stay_generic() {
        let err = AppError::Query(mongodb::error::Error::custom("socket reset by peer"));
        assert_eq!(err.client_message(), "Database query failed");
        assert!(!err.detail().contains("socket"));
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_validation_message_passthrough() {
        let err = AppError::Validation(ValidationError::TitleTooLong);
        assert_eq!(
            err.client_message(),
            "Title must be less than 100 characters"
        );
        assert_eq!(err.log_level(), LogLevel::Debug);
    }
}
