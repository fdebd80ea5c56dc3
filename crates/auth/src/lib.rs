//! Password authentication for vivah.
//!
//! This crate provides:
//! - Argon2id password hashing and verification
//! - HS256 session tokens bound to a user identity
//! - The register/login flow over a [`UserRepository`](vivah_core::storage::UserRepository)
//! - Axum routes and a bearer-token extractor

mod config;
mod credentials;
mod error;
mod extractors;
mod flow;
mod handlers;
mod state;
mod tokens;

pub use config::AuthConfig;
pub use credentials::CredentialService;
pub use error::AuthError;
pub use extractors::CurrentUser;
pub use flow::{AuthFlow, Session};
pub use handlers::{auth_routes, AuthResponse};
pub use state::AuthState;
pub use tokens::TokenService;
