use super::{AuthError, Credentials, Result};

/// Reject credentials with an empty email or password.
///
/// Whitespace-only values count as empty. The password is never trimmed
/// before hashing; only the emptiness check ignores surrounding whitespace.
pub fn require_credentials(credentials: &Credentials) -> Result<()> {
    let mut missing = Vec::new();
    if credentials.email.trim().is_empty() {
        missing.push("email");
    }
    if credentials.password.trim().is_empty() {
        missing.push("password");
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AuthError::Validation(format!(
            "{} required",
            missing.join(" and ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_filled_credentials() {
        assert!(require_credentials(&Credentials::new("a@x.com", "pw1")).is_ok());
    }

    #[test]
    fn test_rejects_empty_email() {
        assert_eq!(
            require_credentials(&Credentials::new("", "pw1")),
            Err(AuthError::Validation("email required".to_string()))
        );
    }

    #[test]
    fn test_rejects_blank_password() {
        assert_eq!(
            require_credentials(&Credentials::new("a@x.com", "   ")),
            Err(AuthError::Validation("password required".to_string()))
        );
    }

    #[test]
    fn test_names_both_missing_fields() {
        assert_eq!(
            require_credentials(&Credentials::new("", "")),
            Err(AuthError::Validation("email and password required".to_string()))
        );
    }
}
