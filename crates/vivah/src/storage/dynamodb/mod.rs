//! DynamoDB storage backend implementation.
//!
//! This module provides a DynamoDB-based [`StoreClient`](vivah_core::storage::StoreClient)
//! using `aws-sdk-dynamodb`. Each entity kind lives in its own table; the
//! schemas come from `vivah_core::storage::table_schemas` and are provisioned
//! with `cargo xtask dynamodb deploy`.

mod conversions;
mod error;
mod store;

pub use store::DynamoDbStore;
