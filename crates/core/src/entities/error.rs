use thiserror::Error;

/// A request payload is missing a required field or carries a bad value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    /// Error listing every required field that was empty.
    pub fn missing(fields: &[&str]) -> Self {
        let verb = if fields.len() == 1 { "is" } else { "are" };
        Self(format!("{} {verb} required", fields.join(", ")))
    }
}
