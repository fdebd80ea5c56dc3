use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use vivah_core::auth::{auth_error_to_status_code, is_client_error};

/// Auth errors for the vivah_auth crate.
///
/// This wraps the core `AuthError` and adds the start-up configuration error,
/// which can't be in the functional core.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Error from the core auth module (validation, credentials, tokens, storage)
    #[error(transparent)]
    Core(#[from] vivah_core::auth::AuthError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<vivah_core::storage::StorageError> for AuthError {
    fn from(error: vivah_core::storage::StorageError) -> Self {
        Self::Core(error.into())
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AuthError::Core(vivah_core::auth::AuthError::TokenInvalid(detail)) => {
                tracing::debug!(detail = %detail, "Rejected token");
                (StatusCode::UNAUTHORIZED, "invalid token".to_string())
            }
            AuthError::Core(core_err) if is_client_error(core_err) => {
                let status = StatusCode::from_u16(auth_error_to_status_code(core_err))
                    .unwrap_or(StatusCode::BAD_REQUEST);
                (status, self.to_string())
            }
            AuthError::Core(_) => {
                tracing::error!("Auth error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AuthError::Config(_) => {
                tracing::error!("Config error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server configuration error".to_string(),
                )
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
