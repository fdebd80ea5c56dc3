use serde::{Deserialize, Serialize};

/// The identity a session token is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    pub email: String,
}

/// Claims embedded in a session token.
///
/// `iat` and `exp` are Unix timestamps in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn identity(&self) -> Identity {
        Identity {
            user_id: self.user_id.clone(),
            email: self.email.clone(),
        }
    }
}

/// Email and password supplied to register or login.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_serialize_user_id_as_camel_case() {
        let claims = Claims {
            user_id: "u1".to_string(),
            email: "a@x.com".to_string(),
            iat: 10,
            exp: 3610,
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["userId"], "u1");
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials::new("a@x.com", "hunter2");
        let debug = format!("{credentials:?}");
        assert!(debug.contains("a@x.com"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_credentials_missing_fields_default_to_empty() {
        let credentials: Credentials = serde_json::from_str(r#"{"email":"a@x.com"}"#).unwrap();
        assert_eq!(credentials.password, "");
    }
}
