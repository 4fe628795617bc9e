use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use models::errors::ModelError;
use service::ServiceError;
use tracing::error;

/// Error returned by every handler; renders as `{"error": kind, "message": text}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub kind: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, kind: &'static str, message: impl Into<String>) -> Self {
        Self { status, kind, message: message.into() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody::new(self.kind, self.message))).into_response()
    }
}

impl From<ModelError> for ApiError {
    fn from(e: ModelError) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, "validation_error", e.to_string())
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        let message = e.to_string();
        let code = e.code();
        match e {
            ServiceError::Validation(m) => m.into(),
            ServiceError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "not_found", message),
            ServiceError::Conflict(_) => Self::new(StatusCode::CONFLICT, "conflict", message),
            ServiceError::Authentication => Self::new(StatusCode::BAD_REQUEST, "authentication_error", message),
            ServiceError::ResourceBusy(_) => Self::new(StatusCode::SERVICE_UNAVAILABLE, "resource_busy", message),
            ServiceError::StorageCorrupt { .. } | ServiceError::Io(_) => {
                error!(error = %message, code, "storage failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "storage_error", message)
            }
        }
    }
}
