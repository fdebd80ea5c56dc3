//! In-memory [`StoreClient`] implementation.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use vivah_core::storage::{
    table_schemas, Attribute, Item, KeyCondition, QueryPage, Result, StorageError, StoreClient,
    TableNames, TableSchema,
};

/// Primary key as stored: partition value, then sort value (empty when the
/// table has no sort key).
type RowKey = (String, String);

#[derive(Debug)]
struct Table {
    schema: TableSchema,
    rows: BTreeMap<RowKey, Item>,
}

impl Table {
    fn row_key(&self, item: &Item) -> Result<RowKey> {
        let partition = key_value(&self.schema, item, &self.schema.partition_key)?;
        let sort = match &self.schema.sort_key {
            Some(sort_key) => key_value(&self.schema, item, sort_key)?,
            None => String::new(),
        };
        Ok((partition, sort))
    }

    /// The attributes DynamoDB would return as `LastEvaluatedKey`.
    fn key_item(&self, item: &Item, index_key: Option<&str>) -> Item {
        self.schema
            .key_attributes()
            .chain(index_key)
            .filter_map(|name| item.get(name).map(|value| (name.to_string(), value.clone())))
            .collect()
    }
}

fn key_value(schema: &TableSchema, item: &Item, attribute: &str) -> Result<String> {
    match item.get(attribute) {
        Some(Attribute::S(value)) if !value.is_empty() => Ok(value.clone()),
        Some(other) => Err(StorageError::Schema {
            entity: schema.table_name.clone(),
            reason: format!("key attribute `{attribute}` must be a non-empty string, got {}", other.kind()),
        }),
        None => Err(StorageError::Schema {
            entity: schema.table_name.clone(),
            reason: format!("missing key attribute `{attribute}`"),
        }),
    }
}

/// In-memory key-value store honouring the canonical table schemas.
///
/// Queries paginate like DynamoDB: at most `page_size` items per call, with a
/// `last_evaluated_key` when more rows follow.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    tables: Arc<RwLock<HashMap<String, Table>>>,
    page_size: usize,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryStore {
    /// Creates an empty store with one table per schema.
    pub fn new(names: &TableNames) -> Self {
        let tables = table_schemas(names)
            .into_iter()
            .map(|schema| {
                let table = Table {
                    schema: schema.clone(),
                    rows: BTreeMap::new(),
                };
                (schema.table_name, table)
            })
            .collect();

        Self {
            tables: Arc::new(RwLock::new(tables)),
            page_size: 100,
            unavailable: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Sets the maximum number of items returned per query page.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Simulate an outage: while set, every call fails with `Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(StorageError::Unavailable(
                "in-memory store is marked unavailable".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

fn missing_table(table: &str) -> StorageError {
    StorageError::Unavailable(format!("table `{table}` does not exist"))
}

#[async_trait]
impl StoreClient for InMemoryStore {
    async fn put_item(&self, table: &str, item: Item) -> Result<()> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let table = tables.get_mut(table).ok_or_else(|| missing_table(table))?;

        let key = table.row_key(&item)?;
        table.rows.insert(key, item);
        Ok(())
    }

    async fn get_item(&self, table: &str, key: Item) -> Result<Option<Item>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        let table = tables.get(table).ok_or_else(|| missing_table(table))?;

        let key = table.row_key(&key)?;
        Ok(table.rows.get(&key).cloned())
    }

    async fn query(
        &self,
        table: &str,
        index: Option<&str>,
        condition: &KeyCondition,
        exclusive_start_key: Option<Item>,
    ) -> Result<QueryPage> {
        self.check_available()?;
        let tables = self.tables.read().await;
        let table = tables.get(table).ok_or_else(|| missing_table(table))?;

        let expected_key = match index {
            Some(name) => {
                let index = table.schema.index(name).ok_or_else(|| StorageError::Schema {
                    entity: table.schema.table_name.clone(),
                    reason: format!("no index named `{name}`"),
                })?;
                index.partition_key.as_str()
            }
            None => table.schema.partition_key.as_str(),
        };
        if condition.attribute != expected_key {
            return Err(StorageError::Schema {
                entity: table.schema.table_name.clone(),
                reason: format!(
                    "query condition on `{}` does not match key `{expected_key}`",
                    condition.attribute
                ),
            });
        }

        let start = exclusive_start_key
            .map(|key| table.row_key(&key))
            .transpose()?;

        let mut matching = table
            .rows
            .iter()
            .filter(|(key, _)| start.as_ref().is_none_or(|start| *key > start))
            .filter(|(_, item)| condition.matches(item))
            .map(|(_, item)| item);

        let items: Vec<Item> = matching.by_ref().take(self.page_size).cloned().collect();
        let more = matching.next().is_some();

        let last_evaluated_key = match items.last() {
            Some(last) if more => Some(table.key_item(last, index.map(|_| expected_key))),
            _ => None,
        };

        Ok(QueryPage {
            items,
            last_evaluated_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(value: &str) -> Attribute {
        Attribute::S(value.to_string())
    }

    fn item(fields: &[(&str, &str)]) -> Item {
        fields
            .iter()
            .map(|(name, value)| (name.to_string(), s(value)))
            .collect()
    }

    fn store() -> InMemoryStore {
        InMemoryStore::new(&TableNames::default())
    }

    #[tokio::test]
    async fn test_get_missing_item_is_none() {
        let store = store();
        let found = store.get_item("Users", item(&[("user_id", "u1")])).await;
        assert_eq!(found, Ok(None));
    }

    #[tokio::test]
    async fn test_put_requires_key_attributes() {
        let store = store();
        let err = store
            .put_item("Matches", item(&[("user_id", "u1")]))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            StorageError::Schema {
                entity: "Matches".to_string(),
                reason: "missing key attribute `match_id`".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_key_attribute_must_be_string() {
        let store = store();
        let mut bad = Item::new();
        bad.insert("user_id".to_string(), Attribute::N("7".to_string()));
        let err = store.put_item("Users", bad).await.unwrap_err();
        assert!(matches!(err, StorageError::Schema { .. }));
    }

    #[tokio::test]
    async fn test_tables_do_not_collide() {
        let store = store();
        store
            .put_item("Users", item(&[("user_id", "u1"), ("email", "a@x.com")]))
            .await
            .unwrap();

        let profile = store
            .get_item("Profiles", item(&[("user_id", "u1")]))
            .await
            .unwrap();
        assert!(profile.is_none());
    }

    #[tokio::test]
    async fn test_query_base_table_partition_in_sort_order() {
        let store = store();
        for (user, liked) in [("u1", "u3"), ("u2", "u1"), ("u1", "u2")] {
            store
                .put_item("Likes", item(&[("user_id", user), ("liked_user_id", liked)]))
                .await
                .unwrap();
        }

        let page = store
            .query("Likes", None, &KeyCondition::equals("user_id", "u1"), None)
            .await
            .unwrap();

        let liked: Vec<&str> = page
            .items
            .iter()
            .filter_map(|i| match i.get("liked_user_id") {
                Some(Attribute::S(id)) => Some(id.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(liked, vec!["u2", "u3"]);
        assert!(page.last_evaluated_key.is_none());
    }

    #[tokio::test]
    async fn test_query_paginates_with_last_evaluated_key() {
        let store = store().with_page_size(2);
        for id in ["m1", "m2", "m3"] {
            store
                .put_item(
                    "Messages",
                    item(&[("user_id", "u1"), ("message_id", id), ("chat_id", "c1")]),
                )
                .await
                .unwrap();
        }
        let condition = KeyCondition::equals("chat_id", "c1");

        let first = store
            .query("Messages", Some("ChatIndex"), &condition, None)
            .await
            .unwrap();
        assert_eq!(first.items.len(), 2);
        let next = first.last_evaluated_key.clone().unwrap();
        assert_eq!(next.get("message_id"), Some(&s("m2")));
        assert_eq!(next.get("chat_id"), Some(&s("c1")));

        let second = store
            .query("Messages", Some("ChatIndex"), &condition, Some(next))
            .await
            .unwrap();
        assert_eq!(second.items.len(), 1);
        assert_eq!(second.items[0].get("message_id"), Some(&s("m3")));
        assert!(second.last_evaluated_key.is_none());
    }

    #[tokio::test]
    async fn test_query_rejects_unknown_index_and_wrong_attribute() {
        let store = store();
        let condition = KeyCondition::equals("chat_id", "c1");

        let err = store
            .query("Users", Some("ChatIndex"), &condition, None)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Schema { .. }));

        let err = store
            .query("Messages", None, &condition, None)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Schema { .. }));
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_every_call() {
        let store = store();
        store.set_unavailable(true);

        let key = item(&[("user_id", "u1")]);
        assert!(matches!(
            store.get_item("Users", key.clone()).await,
            Err(StorageError::Unavailable(_))
        ));
        assert!(matches!(
            store.put_item("Users", key).await,
            Err(StorageError::Unavailable(_))
        ));

        store.set_unavailable(false);
        assert!(store.get_item("Users", item(&[("user_id", "u1")])).await.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_table_is_unavailable() {
        let err = store()
            .get_item("Nope", item(&[("user_id", "u1")]))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            StorageError::Unavailable("table `Nope` does not exist".to_string())
        );
    }
}
