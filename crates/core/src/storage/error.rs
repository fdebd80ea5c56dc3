use thiserror::Error;

/// Errors that can occur while encoding records or talking to the store.
///
/// `Encoding` and `Schema` mean the data itself is wrong and retrying will not
/// help. `Unavailable` is a transient infrastructure failure that the caller
/// may retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("cannot encode field `{field}`: unsupported {kind} value")]
    Encoding { field: String, kind: &'static str },
    #[error("{entity} record does not match its schema: {reason}")]
    Schema { entity: String, reason: String },
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    /// Whether this error describes malformed data rather than a store failure.
    pub fn is_encoding(&self) -> bool {
        matches!(self, Self::Encoding { .. } | Self::Schema { .. })
    }

    pub(crate) fn schema(entity: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Schema {
            entity: entity.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_error_names_field_and_kind() {
        let error = StorageError::Encoding {
            field: "photos[1]".to_string(),
            kind: "null",
        };
        assert_eq!(
            error.to_string(),
            "cannot encode field `photos[1]`: unsupported null value"
        );
        assert!(error.is_encoding());
    }

    #[test]
    fn test_schema_error_display() {
        let error = StorageError::schema("Users", "missing key attribute `user_id`");
        assert_eq!(
            error.to_string(),
            "Users record does not match its schema: missing key attribute `user_id`"
        );
        assert!(error.is_encoding());
    }

    #[test]
    fn test_unavailable_is_not_an_encoding_error() {
        let error = StorageError::Unavailable("timeout after 30s".to_string());
        assert_eq!(error.to_string(), "store unavailable: timeout after 30s");
        assert!(!error.is_encoding());
    }
}
