//! Error types for DynamoDB operations.

use thiserror::Error;

/// Result type alias for dynamodb module.
pub type Result<T> = std::result::Result<T, DynamodbError>;

/// Errors that can occur during DynamoDB operations.
#[derive(Error, Debug)]
pub enum DynamodbError {
    #[error("AWS SDK error: {0}")]
    AwsSdk(String),

    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Operation cancelled by user")]
    UserCancelled,

    #[error("Invalid table names: {0}")]
    InvalidTables(#[from] vivah_core::storage::StorageError),

    #[error("Timeout waiting for table '{table_name}' to become active")]
    TableActivationTimeout { table_name: String },
}

impl DynamodbError {
    pub(crate) fn sdk(error: impl std::fmt::Display) -> Self {
        Self::AwsSdk(error.to_string())
    }
}
