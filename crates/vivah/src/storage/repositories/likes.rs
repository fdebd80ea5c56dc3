use async_trait::async_trait;
use vivah_core::entities::Like;
use vivah_core::storage::{from_record, to_record, LikeRepository, Result, USER_ID};

use crate::storage::{keys, PersistenceAdapter};

const ENTITY: &str = "Like";

/// Likes table, partitioned by the user who gave the like.
#[derive(Clone)]
pub struct LikesTable {
    adapter: PersistenceAdapter,
    table: String,
}

impl LikesTable {
    pub fn new(adapter: PersistenceAdapter, table: impl Into<String>) -> Self {
        Self {
            adapter,
            table: table.into(),
        }
    }
}

#[async_trait]
impl LikeRepository for LikesTable {
    async fn create_like(&self, like: &Like) -> Result<()> {
        let record = to_record(ENTITY, like)?;
        self.adapter.put(&self.table, &record).await
    }

    async fn get_like(&self, user_id: &str, liked_user_id: &str) -> Result<Option<Like>> {
        self.adapter
            .get_by_key(&self.table, &keys::like_key(user_id, liked_user_id))
            .await?
            .map(|record| from_record(ENTITY, record))
            .transpose()
    }

    async fn list_likes_for_user(&self, user_id: &str) -> Result<Vec<Like>> {
        self.adapter
            .query_all(&self.table, None, USER_ID, user_id)
            .await?
            .into_iter()
            .map(|record| from_record(ENTITY, record))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::repositories::test_support::adapter;
    use chrono::Utc;

    #[tokio::test]
    async fn test_likes_are_directional() {
        let (adapter, _, names) = adapter();
        let likes = LikesTable::new(adapter, names.likes);

        let like = Like::new("u1", "u2", Utc::now());
        likes.create_like(&like).await.unwrap();

        assert_eq!(likes.get_like("u1", "u2").await, Ok(Some(like)));
        assert_eq!(likes.get_like("u2", "u1").await, Ok(None));
    }

    #[tokio::test]
    async fn test_list_likes_in_key_order() {
        let (adapter, _, names) = adapter();
        let likes = LikesTable::new(adapter, names.likes);
        let now = Utc::now();
        for liked in ["u4", "u2", "u3"] {
            likes.create_like(&Like::new("u1", liked, now)).await.unwrap();
        }

        let listed = likes.list_likes_for_user("u1").await.unwrap();
        let liked: Vec<&str> = listed.iter().map(|l| l.liked_user_id.as_str()).collect();
        assert_eq!(liked, vec!["u2", "u3", "u4"]);
    }
}
