use async_trait::async_trait;
use vivah_core::entities::{sort_messages, Message};
use vivah_core::storage::{
    from_record, to_record, MessageRepository, Result, CHAT_ID, CHAT_INDEX,
};

use crate::storage::{keys, PersistenceAdapter};

const ENTITY: &str = "Message";

/// Messages table, partitioned by sender and queried per chat through
/// `ChatIndex`.
#[derive(Clone)]
pub struct MessagesTable {
    adapter: PersistenceAdapter,
    table: String,
}

impl MessagesTable {
    pub fn new(adapter: PersistenceAdapter, table: impl Into<String>) -> Self {
        Self {
            adapter,
            table: table.into(),
        }
    }
}

#[async_trait]
impl MessageRepository for MessagesTable {
    async fn create_message(&self, message: &Message) -> Result<()> {
        let record = to_record(ENTITY, message)?;
        self.adapter.put(&self.table, &record).await
    }

    async fn get_message(&self, user_id: &str, message_id: &str) -> Result<Option<Message>> {
        self.adapter
            .get_by_key(&self.table, &keys::message_key(user_id, message_id))
            .await?
            .map(|record| from_record(ENTITY, record))
            .transpose()
    }

    /// Messages of a chat in send order.
    async fn list_messages_for_chat(&self, chat_id: &str) -> Result<Vec<Message>> {
        let mut messages = self
            .adapter
            .query_all(&self.table, Some(CHAT_INDEX), CHAT_ID, chat_id)
            .await?
            .into_iter()
            .map(|record| from_record(ENTITY, record))
            .collect::<Result<Vec<Message>>>()?;

        sort_messages(&mut messages);
        Ok(messages)
    }
}
