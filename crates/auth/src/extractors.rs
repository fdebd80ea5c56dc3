//! Axum extractors for authentication.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use chrono::Utc;
use vivah_core::auth::{AuthError as CoreError, Identity};

use crate::{AuthError, AuthState};

/// Extractor for the authenticated caller. Returns 401 if the bearer token is
/// missing, invalid or expired.
pub struct CurrentUser(pub Identity);

impl<S> FromRequestParts<S> for CurrentUser
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| CoreError::TokenInvalid("missing authorization header".to_string()))?;

        let token = header
            .to_str()
            .ok()
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| CoreError::TokenInvalid("expected a bearer token".to_string()))?;

        let claims = auth_state.flow.authenticate(token, Utc::now())?;
        Ok(CurrentUser(claims.identity()))
    }
}
