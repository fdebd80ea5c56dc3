//! Signed, time-bounded session tokens.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use vivah_core::auth::{claims_for, is_token_expired, AuthError, Claims, Identity, Result};

use crate::config::AuthConfig;

/// Issues and verifies HS256 session tokens.
///
/// HS256 is the only accepted algorithm. Expiry is checked against the
/// caller's `now` rather than the system clock.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.jwt_secret.as_bytes())
    }

    /// Issue a token for `identity`, valid for one hour from `now`.
    pub fn issue(&self, identity: &Identity, now: DateTime<Utc>) -> Result<String> {
        let claims = claims_for(identity, now);
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Verify a token and return its claims.
    ///
    /// # Errors
    ///
    /// - [`AuthError::TokenExpired`] when `now` is past the expiry.
    /// - [`AuthError::TokenInvalid`] for any other failure: bad signature,
    ///   malformed structure or a non-HS256 algorithm.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|e| AuthError::TokenInvalid(e.to_string()))?;

        if is_token_expired(&data.claims, now) {
            return Err(AuthError::TokenExpired);
        }
        Ok(data.claims)
    }
}
