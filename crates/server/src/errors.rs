use axum::extract::multipart::MultipartError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::auth::errors::AuthError;
use service::errors::ServiceError;
use service::upload::UploadError;
use thiserror::Error;
use tracing::{error, warn};

/// Error response rendered as `{"statusCode", "error", "message"}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: String,
    pub message: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: impl Into<String>, message: Option<String>) -> Self {
        Self { status, title: title.into(), message }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Bad Request", Some(message.into()))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized", Some(message.into()))
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, "Service Unavailable", Some(message.into()))
    }

    fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
            Some("Internal server error".into()),
        )
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody::new(self.status.as_u16(), self.title, self.message);
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(msg) => Self::bad_request(msg),
            ServiceError::Constraint(msg) => Self::bad_request(msg),
            ServiceError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, "Not Found", Some(msg)),
            ServiceError::Conflict(msg) => Self::new(StatusCode::CONFLICT, "Conflict", Some(msg)),
            ServiceError::Db(db) => {
                error!(error = %db, "database error");
                Self::internal()
            }
            ServiceError::Internal(msg) => {
                error!(error = %msg, "internal error");
                Self::internal()
            }
        }
    }
}

impl From<AuthError> for JsonApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(msg) => Self::bad_request(msg),
            AuthError::Conflict => {
                Self::new(StatusCode::CONFLICT, "Conflict", Some(AuthError::Conflict.to_string()))
            }
            AuthError::NotFound => {
                Self::new(StatusCode::NOT_FOUND, "Not Found", Some(AuthError::NotFound.to_string()))
            }
            AuthError::Unauthorized => Self::unauthorized(AuthError::Unauthorized.to_string()),
            AuthError::InvalidToken(ref reason) => {
                warn!(%reason, "token rejected");
                Self::unauthorized("Invalid or expired token")
            }
            other => {
                error!(code = other.code(), error = %other, "auth failure");
                Self::internal()
            }
        }
    }
}

impl From<UploadError> for JsonApiError {
    fn from(err: UploadError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<MultipartError> for JsonApiError {
    fn from(err: MultipartError) -> Self {
        let status = err.status();
        Self::new(status, status.canonical_reason().unwrap_or("Bad Request"), Some(err.body_text()))
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
