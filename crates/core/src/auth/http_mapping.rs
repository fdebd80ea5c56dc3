//! Pure functions for mapping auth errors to HTTP status codes.

use super::AuthError;

/// Maps an [`AuthError`] to an HTTP status code.
///
/// - `Validation` -> 400 (Bad Request)
/// - `InvalidCredentials`, `TokenInvalid`, `TokenExpired` -> 401 (Unauthorized)
/// - `NotFound` -> 404 (Not Found)
/// - `Hashing`, `Signing`, `Storage` -> 500 (Internal Server Error)
///
/// # Examples
///
/// ```
/// use vivah_core::auth::{auth_error_to_status_code, AuthError};
///
/// assert_eq!(auth_error_to_status_code(&AuthError::InvalidCredentials), 401);
/// ```
pub fn auth_error_to_status_code(error: &AuthError) -> u16 {
    match error {
        AuthError::Validation(_) => 400,
        AuthError::InvalidCredentials | AuthError::TokenInvalid(_) | AuthError::TokenExpired => 401,
        AuthError::NotFound => 404,
        AuthError::Hashing(_) | AuthError::Signing(_) | AuthError::Storage(_) => 500,
    }
}

/// Whether the error detail may be shown to the caller.
///
/// Server-side failures are reported with a generic message; their detail is
/// only logged.
pub fn is_client_error(error: &AuthError) -> bool {
    auth_error_to_status_code(error) < 500
}
