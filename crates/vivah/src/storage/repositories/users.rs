use async_trait::async_trait;
use futures_util::TryStreamExt;
use vivah_core::entities::User;
use vivah_core::storage::{from_record, to_record, Result, UserRepository, EMAIL, EMAIL_INDEX};

use crate::storage::PersistenceAdapter;

const ENTITY: &str = "User";

/// Users table, looked up by email through `EmailIndex`.
#[derive(Clone)]
pub struct UsersTable {
    adapter: PersistenceAdapter,
    table: String,
}

impl UsersTable {
    pub fn new(adapter: PersistenceAdapter, table: impl Into<String>) -> Self {
        Self {
            adapter,
            table: table.into(),
        }
    }
}

#[async_trait]
impl UserRepository for UsersTable {
    async fn create_user(&self, user: &User) -> Result<()> {
        let record = to_record(ENTITY, user)?;
        self.adapter.put(&self.table, &record).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let rows = self
            .adapter
            .query_by_index(&self.table, Some(EMAIL_INDEX), EMAIL, email);
        futures_util::pin_mut!(rows);

        let Some(first) = rows.try_next().await? else {
            return Ok(None);
        };
        let first: User = from_record(ENTITY, first)?;

        if let Some(other) = rows.try_next().await? {
            tracing::warn!(
                user_id = %first.user_id,
                other_user_id = other.get("user_id").and_then(|v| v.as_str()).unwrap_or("?"),
                "Several users share one email; using the first"
            );
        }
        Ok(Some(first))
    }
}
