use actix::MailboxError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Error returned by every table operation. The message is sent to the
/// client as `{ "error": message }`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed, incomplete or state-incompatible request (400).
    #[error("{0}")]
    Validation(String),
    /// A referenced table or reservation does not exist (404).
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(err: diesel::result::Error) -> Self {
        tracing::error!(error = %err, "Database query failed");
        AppError::Internal("Unable to complete the database operation".into())
    }
}

impl From<MailboxError> for AppError {
    fn from(err: MailboxError) -> Self {
        tracing::error!(error = %err, "Database actor unavailable");
        AppError::Internal("Unable to reach the database worker".into())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if !matches!(self, AppError::Internal(_)) {
            tracing::debug!(status = %self.status_code(), reason = %self, "Request rejected");
        }

        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("unable to initialize connection pool: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
