//! One-way password hashing.

use argon2::{
    password_hash::{self, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use rand_core::OsRng;
use vivah_core::auth::{AuthError, Result};

/// Hashes and verifies passwords with Argon2id.
///
/// Hashes are PHC strings carrying their own salt and parameters, so
/// verification needs nothing but the stored hash.
#[derive(Clone, Default)]
pub struct CredentialService {
    argon2: Argon2<'static>,
}

impl CredentialService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash a password with a fresh random salt.
    pub fn hash_password(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Hashing(e.to_string()))
    }

    /// Check a password against a stored hash.
    ///
    /// A wrong password is `Ok(false)`; only a malformed hash is an error.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        let parsed = PasswordHash::new(hash).map_err(|e| AuthError::Hashing(e.to_string()))?;
        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::Hashing(e.to_string())),
        }
    }
}
