//! Entity-agnostic CRUD over any [`StoreClient`].

use std::sync::Arc;

use async_stream::try_stream;
use futures_util::{Stream, TryStreamExt};
use vivah_core::storage::{
    decode_item, encode_record, KeyCondition, Record, Result, StoreClient,
};

/// Generic put/get/query over named tables.
///
/// Store failures and codec failures propagate unchanged; nothing is retried
/// here.
#[derive(Clone)]
pub struct PersistenceAdapter {
    client: Arc<dyn StoreClient>,
}

impl PersistenceAdapter {
    pub fn new(client: Arc<dyn StoreClient>) -> Self {
        Self { client }
    }

    /// Encode and write a record, replacing any record with the same key.
    pub async fn put(&self, table: &str, record: &Record) -> Result<()> {
        let item = encode_record(record)?;
        self.client.put_item(table, item).await
    }

    /// Read a record by its full primary key. `None` means not found.
    pub async fn get_by_key(&self, table: &str, key: &Record) -> Result<Option<Record>> {
        let key = encode_record(key)?;
        match self.client.get_item(table, key).await? {
            Some(item) => decode_item(&item).map(Some),
            None => Ok(None),
        }
    }

    /// Lazily stream every record whose `key_field` equals `key_value`.
    ///
    /// Pages are fetched as the stream is polled. The stream owns its inputs,
    /// so calling this again re-issues the query from the start. Records come
    /// in the store's key order.
    pub fn query_by_index(
        &self,
        table: &str,
        index: Option<&str>,
        key_field: &str,
        key_value: &str,
    ) -> impl Stream<Item = Result<Record>> + Send + 'static {
        let client = self.client.clone();
        let table = table.to_string();
        let index = index.map(str::to_string);
        let condition = KeyCondition::equals(key_field, key_value);

        try_stream! {
            let mut start_key = None;
            loop {
                let page = client
                    .query(&table, index.as_deref(), &condition, start_key.take())
                    .await?;

                for item in &page.items {
                    yield decode_item(item)?;
                }

                match page.last_evaluated_key {
                    Some(key) => start_key = Some(key),
                    None => break,
                }
            }
        }
    }

    /// Run [`query_by_index`](Self::query_by_index) to completion.
    pub async fn query_all(
        &self,
        table: &str,
        index: Option<&str>,
        key_field: &str,
        key_value: &str,
    ) -> Result<Vec<Record>> {
        self.query_by_index(table, index, key_field, key_value)
            .try_collect()
            .await
    }
}
