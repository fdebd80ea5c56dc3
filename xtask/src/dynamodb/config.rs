//! Table configuration types (Functional Core - pure data).
//!
//! Derived from the key schemas in `vivah_core` so the provisioned tables
//! always match what the server reads and writes.

use vivah_core::storage::{table_schemas, TableNames, TableSchema};

/// Table configuration. Every key attribute is a string (`S`) and every
/// table bills per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub table_name: String,
    pub partition_key: String,
    pub sort_key: Option<String>,
    pub gsis: Vec<GsiConfig>,
}

/// Global Secondary Index configuration. Projects all attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GsiConfig {
    pub name: String,
    pub partition_key: String,
}

impl From<&TableSchema> for TableConfig {
    fn from(schema: &TableSchema) -> Self {
        Self {
            table_name: schema.table_name.clone(),
            partition_key: schema.partition_key.clone(),
            sort_key: schema.sort_key.clone(),
            gsis: schema
                .indexes
                .iter()
                .map(|index| GsiConfig {
                    name: index.name.clone(),
                    partition_key: index.partition_key.clone(),
                })
                .collect(),
        }
    }
}

impl TableConfig {
    /// Every attribute that needs a definition: table keys, then GSI keys,
    /// without duplicates.
    pub fn attribute_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        let keys = std::iter::once(self.partition_key.as_str())
            .chain(self.sort_key.as_deref())
            .chain(self.gsis.iter().map(|gsi| gsi.partition_key.as_str()));
        for name in keys {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }
}

/// Returns the configuration of all vivah tables.
/// This is a pure function - no I/O.
pub fn vivah_table_configs(names: &TableNames) -> Vec<TableConfig> {
    table_schemas(names).iter().map(TableConfig::from).collect()
}
