use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use vivah_core::entities::ValidationError;
use vivah_core::storage::StorageError;

/// Errors returned by the entity handlers.
///
/// Validation and not-found errors carry a message meant for the client.
/// Storage errors are logged in full and answered with a generic 500.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(ValidationError(rejection.body_text()))
    }
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            AppError::Storage(error) => {
                tracing::error!(error = %error, encoding = error.is_encoding(), "Storage error");
                "Internal server error".to_string()
            }
            other => {
                tracing::warn!(status = %status, message = %other, "API error");
                other.to_string()
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
