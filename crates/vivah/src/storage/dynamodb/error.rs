//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `StorageError`. A `ValidationException` means the
//! request itself was malformed and becomes `Schema`. Every other SDK failure,
//! timeouts and dispatch errors included, becomes `Unavailable`.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use vivah_core::storage::StorageError;

const VALIDATION_EXCEPTION: &str = "ValidationException";

/// DynamoDB rejected the request shape, e.g. a key attribute of the wrong type.
fn validation_error<E: ProvideErrorMetadata>(err: &E, table: &str) -> Option<StorageError> {
    (err.code() == Some(VALIDATION_EXCEPTION)).then(|| StorageError::Schema {
        entity: table.to_string(),
        reason: err.message().unwrap_or("request rejected by DynamoDB").to_string(),
    })
}

/// Map a GetItem SDK error to StorageError.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
    table: &str,
) -> StorageError {
    let err = err.into_service_error();
    if let Some(schema) = validation_error(&err, table) {
        return schema;
    }
    let message = match err {
        GetItemError::ResourceNotFoundException(_) => format!("Table {table} not found"),
        GetItemError::ProvisionedThroughputExceededException(_) => {
            "Throughput exceeded, please retry".to_string()
        }
        GetItemError::RequestLimitExceeded(_) => "Request limit exceeded, please retry".to_string(),
        GetItemError::InternalServerError(_) => "DynamoDB internal server error".to_string(),
        err => format!("GetItem on {table} failed: {err:?}"),
    };
    StorageError::Unavailable(message)
}

/// Map a PutItem SDK error to StorageError.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
    table: &str,
) -> StorageError {
    let err = err.into_service_error();
    if let Some(schema) = validation_error(&err, table) {
        return schema;
    }
    let message = match err {
        PutItemError::ResourceNotFoundException(_) => format!("Table {table} not found"),
        PutItemError::ProvisionedThroughputExceededException(_) => {
            "Throughput exceeded, please retry".to_string()
        }
        PutItemError::RequestLimitExceeded(_) => "Request limit exceeded, please retry".to_string(),
        PutItemError::ItemCollectionSizeLimitExceededException(_) => {
            "Item collection size limit exceeded".to_string()
        }
        PutItemError::TransactionConflictException(_) => {
            "Transaction conflict, please retry".to_string()
        }
        PutItemError::InternalServerError(_) => "DynamoDB internal server error".to_string(),
        err => format!("PutItem on {table} failed: {err:?}"),
    };
    StorageError::Unavailable(message)
}

/// Map a Query SDK error to StorageError.
pub fn map_query_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<QueryError, R>,
    table: &str,
) -> StorageError {
    let err = err.into_service_error();
    if let Some(schema) = validation_error(&err, table) {
        return schema;
    }
    let message = match err {
        QueryError::ResourceNotFoundException(_) => format!("Table {table} not found"),
        QueryError::ProvisionedThroughputExceededException(_) => {
            "Throughput exceeded, please retry".to_string()
        }
        QueryError::RequestLimitExceeded(_) => "Request limit exceeded, please retry".to_string(),
        QueryError::InternalServerError(_) => "DynamoDB internal server error".to_string(),
        err => format!("Query on {table} failed: {err:?}"),
    };
    StorageError::Unavailable(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::error::ErrorMetadata;

    fn service_error<E>(err: E) -> SdkError<E, ()> {
        SdkError::service_error(err, ())
    }

    fn metadata(code: &str, message: &str) -> ErrorMetadata {
        ErrorMetadata::builder().code(code).message(message).build()
    }

    #[test]
    fn test_validation_exception_is_a_schema_error() {
        let err = service_error(PutItemError::generic(metadata(
            "ValidationException",
            "One or more parameter values were invalid: Type mismatch for key user_id",
        )));

        let mapped = map_put_item_error(err, "Likes");
        assert_eq!(
            mapped,
            StorageError::Schema {
                entity: "Likes".to_string(),
                reason: "One or more parameter values were invalid: Type mismatch for key user_id"
                    .to_string(),
            }
        );
        assert!(mapped.is_encoding());
    }

    #[test]
    fn test_query_validation_exception_is_a_schema_error() {
        let err = service_error(QueryError::generic(metadata(
            "ValidationException",
            "Query condition missed key schema element",
        )));

        assert!(map_query_error(err, "Messages").is_encoding());
    }

    #[test]
    fn test_other_service_errors_are_unavailable() {
        let err = service_error(GetItemError::generic(metadata(
            "ThrottlingException",
            "Rate exceeded",
        )));

        let mapped = map_get_item_error(err, "Users");
        assert!(matches!(mapped, StorageError::Unavailable(_)));
        assert!(!mapped.is_encoding());
    }
}
