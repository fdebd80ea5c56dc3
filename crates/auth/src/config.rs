use crate::error::AuthError;

/// Auth configuration, read once at start-up.
#[derive(Clone)]
pub struct AuthConfig {
    /// Symmetric secret used to sign session tokens.
    pub jwt_secret: String,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
        }
    }

    /// Load from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `JWT_SECRET`: token signing secret (required, must not be empty)
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Config`] when the secret is missing or empty.
    pub fn from_env() -> Result<Self, AuthError> {
        Self::from_secret(std::env::var("JWT_SECRET").ok())
    }

    fn from_secret(secret: Option<String>) -> Result<Self, AuthError> {
        match secret {
            Some(secret) if !secret.trim().is_empty() => Ok(Self::new(secret)),
            Some(_) => Err(AuthError::Config("JWT_SECRET must not be empty".to_string())),
            None => Err(AuthError::Config("JWT_SECRET is not set".to_string())),
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .finish()
    }
}
