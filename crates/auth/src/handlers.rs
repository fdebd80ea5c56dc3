//! HTTP handlers for auth routes.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use vivah_core::auth::{AuthError as CoreError, Credentials};

use crate::{AuthError, AuthState, Session};

/// Response body for register and login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user_id: String,
}

impl AuthResponse {
    fn new(message: &str, session: Session) -> Self {
        Self {
            message: message.to_string(),
            token: session.token,
            user_id: session.identity.user_id,
        }
    }
}

/// Creates the auth router.
///
/// Routes:
/// - `POST /auth/register` - Create a user and return a session token
/// - `POST /auth/login` - Check a password and return a session token
pub fn auth_routes() -> Router<AuthState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

fn credentials(payload: Result<Json<Credentials>, JsonRejection>) -> Result<Credentials, AuthError> {
    payload
        .map(|Json(credentials)| credentials)
        .map_err(|rejection| CoreError::Validation(rejection.body_text()).into())
}

async fn register(
    State(state): State<AuthState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<AuthResponse>, AuthError> {
    let credentials = credentials(payload)?;
    let session = state.flow.register(&credentials, Utc::now()).await?;
    Ok(Json(AuthResponse::new("User registered successfully", session)))
}

async fn login(
    State(state): State<AuthState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<AuthResponse>, AuthError> {
    let credentials = credentials(payload)?;
    let session = state.flow.login(&credentials, Utc::now()).await?;
    Ok(Json(AuthResponse::new("Login successful", session)))
}
