use std::collections::HashMap;

/// Schemaless in-memory representation of an entity.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// A stored item in the store's typed attribute format.
pub type Item = HashMap<String, Attribute>;

/// A single typed attribute, mirroring DynamoDB's `AttributeValue`.
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    /// String.
    S(String),
    /// Number, carried as its decimal text.
    N(String),
    /// Boolean.
    Bool(bool),
    /// Explicit null.
    Null,
    /// List of attributes.
    L(Vec<Attribute>),
    /// Nested map.
    M(Item),
    /// Binary blob.
    B(Vec<u8>),
}

impl Attribute {
    /// Name of the attribute kind, as used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::S(_) => "string",
            Self::N(_) => "number",
            Self::Bool(_) => "boolean",
            Self::Null => "null",
            Self::L(_) => "list",
            Self::M(_) => "map",
            Self::B(_) => "binary",
        }
    }
}

/// Equality condition on a partition attribute, used by queries.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyCondition {
    pub attribute: String,
    pub value: Attribute,
}

impl KeyCondition {
    /// `attribute = value` on a string attribute.
    pub fn equals(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            value: Attribute::S(value.into()),
        }
    }

    /// Whether the given item satisfies this condition.
    pub fn matches(&self, item: &Item) -> bool {
        item.get(&self.attribute) == Some(&self.value)
    }
}

/// One page of query results.
///
/// `last_evaluated_key` is set when more rows may follow; pass it back as the
/// exclusive start key to fetch the next page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryPage {
    pub items: Vec<Item>,
    pub last_evaluated_key: Option<Item>,
}
