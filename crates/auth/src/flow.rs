//! Register and login.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use vivah_core::auth::{
    generate_user_id, require_credentials, AuthError, Claims, Credentials, Identity, Result,
};
use vivah_core::entities::User;
use vivah_core::storage::UserRepository;

use crate::{CredentialService, TokenService};

/// A freshly issued session token and the identity it is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub identity: Identity,
}

/// Orchestrates credentials, tokens and the users table.
#[derive(Clone)]
pub struct AuthFlow {
    users: Arc<dyn UserRepository>,
    credentials: CredentialService,
    tokens: TokenService,
}

impl AuthFlow {
    pub fn new(
        users: Arc<dyn UserRepository>,
        credentials: CredentialService,
        tokens: TokenService,
    ) -> Self {
        Self {
            users,
            credentials,
            tokens,
        }
    }

    /// Create a user and issue a token for it.
    ///
    /// Email uniqueness is not checked: two registrations with the same
    /// address both succeed and create two users.
    pub async fn register(&self, credentials: &Credentials, now: DateTime<Utc>) -> Result<Session> {
        require_credentials(credentials)?;

        let password_hash = self.hash_password(credentials.password.clone()).await?;
        let user = User::new(generate_user_id(), credentials.email.trim(), password_hash);
        self.users.create_user(&user).await?;

        tracing::info!(user_id = %user.user_id, "Registered user");
        self.issue(user, now)
    }

    /// Check a user's password and issue a token for it.
    pub async fn login(&self, credentials: &Credentials, now: DateTime<Utc>) -> Result<Session> {
        require_credentials(credentials)?;

        let user = self
            .users
            .get_user_by_email(credentials.email.trim())
            .await?
            .ok_or(AuthError::NotFound)?;

        let verified = self
            .verify_password(credentials.password.clone(), user.password_hash.clone())
            .await?;
        if !verified {
            tracing::debug!(user_id = %user.user_id, "Rejected login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.user_id, "User logged in");
        self.issue(user, now)
    }

    /// Verify a bearer token presented on a request.
    pub fn authenticate(&self, token: &str, now: DateTime<Utc>) -> Result<Claims> {
        self.tokens.verify(token, now)
    }

    fn issue(&self, user: User, now: DateTime<Utc>) -> Result<Session> {
        let identity = Identity {
            user_id: user.user_id,
            email: user.email,
        };
        let token = self.tokens.issue(&identity, now)?;
        Ok(Session { token, identity })
    }

    async fn hash_password(&self, password: String) -> Result<String> {
        let credentials = self.credentials.clone();
        tokio::task::spawn_blocking(move || credentials.hash_password(&password))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool> {
        let credentials = self.credentials.clone();
        tokio::task::spawn_blocking(move || credentials.verify_password(&password, &hash))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?
    }
}
