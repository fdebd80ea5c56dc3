//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between the store-neutral [`Item`] and
//! DynamoDB `AttributeValue` maps. These are testable in isolation without
//! DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::AttributeValue;
use vivah_core::storage::{Attribute, Item, Result, StorageError};

/// A DynamoDB item.
pub type DynamoItem = HashMap<String, AttributeValue>;

/// Convert an attribute to its DynamoDB representation.
pub fn to_attribute_value(attribute: Attribute) -> AttributeValue {
    match attribute {
        Attribute::S(s) => AttributeValue::S(s),
        Attribute::N(n) => AttributeValue::N(n),
        Attribute::Bool(b) => AttributeValue::Bool(b),
        Attribute::Null => AttributeValue::Null(true),
        Attribute::L(values) => {
            AttributeValue::L(values.into_iter().map(to_attribute_value).collect())
        }
        Attribute::M(map) => AttributeValue::M(to_dynamo_item(map)),
        Attribute::B(bytes) => AttributeValue::B(Blob::new(bytes)),
    }
}

/// Convert an item to a DynamoDB item.
pub fn to_dynamo_item(item: Item) -> DynamoItem {
    item.into_iter()
        .map(|(name, attribute)| (name, to_attribute_value(attribute)))
        .collect()
}

/// Convert a DynamoDB item to an item.
///
/// Sets are never written by this service and are rejected.
pub fn from_dynamo_item(item: DynamoItem) -> Result<Item> {
    from_dynamo_map(None, item)
}

fn from_dynamo_map(prefix: Option<&str>, item: DynamoItem) -> Result<Item> {
    item.into_iter()
        .map(|(name, value)| {
            let path = match prefix {
                Some(prefix) => format!("{prefix}.{name}"),
                None => name.clone(),
            };
            from_attribute_value(&path, value).map(|attribute| (name, attribute))
        })
        .collect()
}

fn from_attribute_value(path: &str, value: AttributeValue) -> Result<Attribute> {
    let unsupported = |kind: &'static str| StorageError::Encoding {
        field: path.to_string(),
        kind,
    };

    match value {
        AttributeValue::S(s) => Ok(Attribute::S(s)),
        AttributeValue::N(n) => Ok(Attribute::N(n)),
        AttributeValue::Bool(b) => Ok(Attribute::Bool(b)),
        AttributeValue::Null(_) => Ok(Attribute::Null),
        AttributeValue::L(values) => values
            .into_iter()
            .enumerate()
            .map(|(i, v)| from_attribute_value(&format!("{path}[{i}]"), v))
            .collect::<Result<Vec<_>>>()
            .map(Attribute::L),
        AttributeValue::M(map) => from_dynamo_map(Some(path), map).map(Attribute::M),
        AttributeValue::B(blob) => Ok(Attribute::B(blob.into_inner())),
        AttributeValue::Ss(_) => Err(unsupported("string set")),
        AttributeValue::Ns(_) => Err(unsupported("number set")),
        AttributeValue::Bs(_) => Err(unsupported("binary set")),
        _ => Err(unsupported("unknown")),
    }
}
