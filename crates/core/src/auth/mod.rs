mod error;
mod functions;
mod http_mapping;
mod types;
mod validation;

pub use error::{AuthError, Result};
pub use functions::{claims_for, generate_user_id, is_token_expired, TOKEN_TTL_SECS};
pub use http_mapping::{auth_error_to_status_code, is_client_error};
pub use types::{Claims, Credentials, Identity};
pub use validation::require_credentials;
