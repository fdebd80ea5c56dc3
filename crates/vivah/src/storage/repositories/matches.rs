use async_trait::async_trait;
use vivah_core::entities::Match;
use vivah_core::storage::{from_record, to_record, MatchRepository, Result, USER_ID};

use crate::storage::{keys, PersistenceAdapter};

const ENTITY: &str = "Match";

/// Matches table, partitioned by owner.
#[derive(Clone)]
pub struct MatchesTable {
    adapter: PersistenceAdapter,
    table: String,
}

impl MatchesTable {
    pub fn new(adapter: PersistenceAdapter, table: impl Into<String>) -> Self {
        Self {
            adapter,
            table: table.into(),
        }
    }
}

#[async_trait]
impl MatchRepository for MatchesTable {
    async fn create_match(&self, m: &Match) -> Result<()> {
        let record = to_record(ENTITY, m)?;
        self.adapter.put(&self.table, &record).await
    }

    async fn get_match(&self, user_id: &str, match_id: &str) -> Result<Option<Match>> {
        self.adapter
            .get_by_key(&self.table, &keys::match_key(user_id, match_id))
            .await?
            .map(|record| from_record(ENTITY, record))
            .transpose()
    }

    async fn update_match(&self, m: &Match) -> Result<()> {
        let record = to_record(ENTITY, m)?;
        self.adapter.put(&self.table, &record).await
    }

    async fn list_matches_for_user(&self, user_id: &str) -> Result<Vec<Match>> {
        self.adapter
            .query_all(&self.table, None, USER_ID, user_id)
            .await?
            .into_iter()
            .map(|record| from_record(ENTITY, record))
            .collect()
    }
}
