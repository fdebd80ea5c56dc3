//! Attribute codec.
//!
//! Pure functions converting between [`Record`]s and the store's typed
//! attribute format. `decode_item(&encode_record(r)?)` returns `r` for every
//! record built from supported value kinds.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Number, Value};

use super::{Attribute, Item, Record, Result, StorageError};

/// Encode a record into a store item.
pub fn encode_record(record: &Record) -> Result<Item> {
    encode_map(None, record)
}

/// Decode a store item into a record.
pub fn decode_item(item: &Item) -> Result<Record> {
    decode_map(None, item)
}

/// Convert a typed entity into a record.
pub fn to_record<T: Serialize>(entity: &str, value: &T) -> Result<Record> {
    match serde_json::to_value(value) {
        Ok(Value::Object(record)) => Ok(record),
        Ok(other) => Err(StorageError::schema(
            entity,
            format!("expected an object, got {}", value_kind(&other)),
        )),
        Err(e) => Err(StorageError::schema(entity, e.to_string())),
    }
}

/// Convert a record into a typed entity.
pub fn from_record<T: DeserializeOwned>(entity: &str, record: Record) -> Result<T> {
    serde_json::from_value(Value::Object(record))
        .map_err(|e| StorageError::schema(entity, e.to_string()))
}

fn encode_map(prefix: Option<&str>, record: &Record) -> Result<Item> {
    record
        .iter()
        .map(|(name, value)| {
            let path = field_path(prefix, name);
            encode_value(&path, value).map(|attribute| (name.clone(), attribute))
        })
        .collect()
}

fn encode_value(path: &str, value: &Value) -> Result<Attribute> {
    match value {
        Value::String(s) => Ok(Attribute::S(s.clone())),
        Value::Number(n) => Ok(Attribute::N(n.to_string())),
        Value::Bool(b) => Ok(Attribute::Bool(*b)),
        Value::Object(map) => encode_map(Some(path), map).map(Attribute::M),
        Value::Array(values) => values
            .iter()
            .enumerate()
            .map(|(i, v)| encode_value(&format!("{path}[{i}]"), v))
            .collect::<Result<Vec<_>>>()
            .map(Attribute::L),
        Value::Null => Err(StorageError::Encoding {
            field: path.to_string(),
            kind: "null",
        }),
    }
}

fn decode_map(prefix: Option<&str>, item: &Item) -> Result<Record> {
    item.iter()
        .map(|(name, attribute)| {
            let path = field_path(prefix, name);
            decode_attribute(&path, attribute).map(|value| (name.clone(), value))
        })
        .collect()
}

fn decode_attribute(path: &str, attribute: &Attribute) -> Result<Value> {
    match attribute {
        Attribute::S(s) => Ok(Value::String(s.clone())),
        Attribute::N(text) => parse_number(path, text).map(Value::Number),
        Attribute::Bool(b) => Ok(Value::Bool(*b)),
        Attribute::M(map) => decode_map(Some(path), map).map(Value::Object),
        Attribute::L(values) => values
            .iter()
            .enumerate()
            .map(|(i, v)| decode_attribute(&format!("{path}[{i}]"), v))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        Attribute::Null | Attribute::B(_) => Err(StorageError::Encoding {
            field: path.to_string(),
            kind: attribute.kind(),
        }),
    }
}

/// Parse number text, preferring the integer representations so integers
/// survive the round trip unchanged.
fn parse_number(path: &str, text: &str) -> Result<Number> {
    if let Ok(n) = text.parse::<u64>() {
        return Ok(n.into());
    }
    if let Ok(n) = text.parse::<i64>() {
        return Ok(n.into());
    }
    text.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| StorageError::Encoding {
            field: path.to_string(),
            kind: "number",
        })
}

fn field_path(prefix: Option<&str>, name: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}.{name}"),
        None => name.to_string(),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "map",
    }
}
