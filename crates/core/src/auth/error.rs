use thiserror::Error;

use crate::storage::StorageError;

/// Errors raised by the authentication flow, credentials and tokens.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("user not found")]
    NotFound,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    #[error("token expired")]
    TokenExpired,

    #[error("token signing failed: {0}")]
    Signing(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type for auth operations.
pub type Result<T> = std::result::Result<T, AuthError>;
