//! Table names and key schemas (Functional Core - pure data).

use std::env;

use super::error::{Result, StorageError};

/// Primary key attribute shared by every table.
pub const USER_ID: &str = "user_id";
pub const EMAIL: &str = "email";
pub const MATCH_ID: &str = "match_id";
pub const LIKED_USER_ID: &str = "liked_user_id";
pub const MESSAGE_ID: &str = "message_id";
pub const CHAT_ID: &str = "chat_id";

/// Secondary index over `Users.email`.
pub const EMAIL_INDEX: &str = "EmailIndex";
/// Secondary index over `Messages.chat_id`.
pub const CHAT_INDEX: &str = "ChatIndex";

/// Physical table name for each entity kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNames {
    pub users: String,
    pub profiles: String,
    pub matches: String,
    pub likes: String,
    pub messages: String,
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            users: "Users".to_string(),
            profiles: "Profiles".to_string(),
            matches: "Matches".to_string(),
            likes: "Likes".to_string(),
            messages: "Messages".to_string(),
        }
    }
}

impl TableNames {
    /// Load table names from environment variables.
    ///
    /// Environment variables:
    /// - `USERS_TABLE` (default: "Users")
    /// - `PROFILES_TABLE` (default: "Profiles")
    /// - `MATCHES_TABLE` (default: "Matches")
    /// - `LIKES_TABLE` (default: "Likes")
    /// - `MESSAGES_TABLE` (default: "Messages")
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load table names through `lookup`, falling back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            users: lookup("USERS_TABLE").unwrap_or(defaults.users),
            profiles: lookup("PROFILES_TABLE").unwrap_or(defaults.profiles),
            matches: lookup("MATCHES_TABLE").unwrap_or(defaults.matches),
            likes: lookup("LIKES_TABLE").unwrap_or(defaults.likes),
            messages: lookup("MESSAGES_TABLE").unwrap_or(defaults.messages),
        }
    }

    fn entries(&self) -> [(&'static str, &str); 5] {
        [
            ("users", &self.users),
            ("profiles", &self.profiles),
            ("matches", &self.matches),
            ("likes", &self.likes),
            ("messages", &self.messages),
        ]
    }

    /// Reject blank names and names shared by two entity kinds.
    ///
    /// Two kinds on one physical table would overwrite each other's records.
    pub fn validate(&self) -> Result<()> {
        let entries = self.entries();
        for (i, (kind, name)) in entries.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(StorageError::schema(*kind, "table name must not be empty"));
            }
            if let Some((other, _)) = entries[..i].iter().find(|(_, earlier)| earlier == name) {
                return Err(StorageError::schema(
                    *name,
                    format!("table name is shared by `{other}` and `{kind}`"),
                ));
            }
        }
        Ok(())
    }

    /// Prefix every table name, e.g. `dev-` for a shared account.
    pub fn with_prefix(self, prefix: &str) -> Self {
        Self {
            users: format!("{prefix}{}", self.users),
            profiles: format!("{prefix}{}", self.profiles),
            matches: format!("{prefix}{}", self.matches),
            likes: format!("{prefix}{}", self.likes),
            messages: format!("{prefix}{}", self.messages),
        }
    }
}

/// Key schema of one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub table_name: String,
    pub partition_key: String,
    pub sort_key: Option<String>,
    pub indexes: Vec<IndexSchema>,
}

/// A secondary index keyed on a single string attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSchema {
    pub name: String,
    pub partition_key: String,
}

impl TableSchema {
    fn new(table_name: &str, partition_key: &str, sort_key: Option<&str>) -> Self {
        Self {
            table_name: table_name.to_string(),
            partition_key: partition_key.to_string(),
            sort_key: sort_key.map(str::to_string),
            indexes: Vec::new(),
        }
    }

    fn with_index(mut self, name: &str, partition_key: &str) -> Self {
        self.indexes.push(IndexSchema {
            name: name.to_string(),
            partition_key: partition_key.to_string(),
        });
        self
    }

    /// Names of the primary key attributes, partition key first.
    pub fn key_attributes(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.partition_key.as_str()).chain(self.sort_key.as_deref())
    }

    /// Look up a secondary index by name.
    pub fn index(&self, name: &str) -> Option<&IndexSchema> {
        self.indexes.iter().find(|index| index.name == name)
    }
}

/// The canonical schemas of all five tables.
pub fn table_schemas(names: &TableNames) -> Vec<TableSchema> {
    vec![
        TableSchema::new(&names.users, USER_ID, None).with_index(EMAIL_INDEX, EMAIL),
        TableSchema::new(&names.profiles, USER_ID, None),
        TableSchema::new(&names.matches, USER_ID, Some(MATCH_ID)),
        TableSchema::new(&names.likes, USER_ID, Some(LIKED_USER_ID)),
        TableSchema::new(&names.messages, USER_ID, Some(MESSAGE_ID)).with_index(CHAT_INDEX, CHAT_ID),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_names() {
        let names = TableNames::default();
        assert_eq!(names.users, "Users");
        assert_eq!(names.messages, "Messages");
    }

    #[test]
    fn test_prefixed_table_names() {
        let names = TableNames::default().with_prefix("dev-");
        assert_eq!(names.users, "dev-Users");
        assert_eq!(names.likes, "dev-Likes");
    }

    #[test]
    fn test_table_names_from_lookup_override_defaults() {
        let names = TableNames::from_lookup(|key| (key == "LIKES_TABLE").then(|| "prod-likes".to_string()));
        assert_eq!(names.likes, "prod-likes");
        assert_eq!(names.users, "Users");
        assert!(names.validate().is_ok());
    }

    #[test]
    fn test_shared_table_name_is_rejected() {
        let names = TableNames::from_lookup(|key| (key == "LIKES_TABLE").then(|| "Users".to_string()));
        assert_eq!(
            names.validate(),
            Err(StorageError::Schema {
                entity: "Users".to_string(),
                reason: "table name is shared by `users` and `likes`".to_string(),
            })
        );
    }

    #[test]
    fn test_blank_table_name_is_rejected() {
        let names = TableNames {
            messages: "  ".to_string(),
            ..TableNames::default()
        };
        let err = names.validate().unwrap_err();
        assert!(err.to_string().contains("messages"));
    }

    #[test]
    fn test_schemas_have_distinct_tables() {
        let schemas = table_schemas(&TableNames::default());
        let mut names: Vec<&str> = schemas.iter().map(|s| s.table_name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 5);
    }

    #[test]
    fn test_message_schema_keys_and_index() {
        let schemas = table_schemas(&TableNames::default());
        let messages = schemas
            .iter()
            .find(|s| s.table_name == "Messages")
            .unwrap();

        assert_eq!(
            messages.key_attributes().collect::<Vec<_>>(),
            vec!["user_id", "message_id"]
        );
        assert_eq!(messages.index(CHAT_INDEX).unwrap().partition_key, "chat_id");
        assert!(messages.index(EMAIL_INDEX).is_none());
    }

    #[test]
    fn test_users_schema_has_email_index() {
        let schemas = table_schemas(&TableNames::default());
        let users = &schemas[0];
        assert_eq!(users.key_attributes().collect::<Vec<_>>(), vec!["user_id"]);
        assert_eq!(users.index(EMAIL_INDEX).unwrap().partition_key, "email");
    }
}
