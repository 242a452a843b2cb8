use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// JSON error body `{"error": ..., "message": ...}` with a status code.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: &'static str,
    pub message: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &'static str, message: Option<String>) -> Self {
        Self { status, error, message }
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, "Validation Error", Some(message.into()))
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Conflict(_) => Self::new(StatusCode::CONFLICT, "Conflict", Some(e.to_string())),
            ServiceError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "Not Found", Some(e.to_string())),
            ServiceError::Validation(_) => Self::unprocessable(e.to_string()),
            ServiceError::Db(_) => {
                error!(err = %e, "request failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", None)
            }
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({"error": self.error, "message": self.message}))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
}
