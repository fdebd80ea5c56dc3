use async_trait::async_trait;
use vivah_core::entities::Profile;
use vivah_core::storage::{from_record, to_record, ProfileRepository, Result};

use crate::storage::{keys, PersistenceAdapter};

const ENTITY: &str = "Profile";

/// Profiles table, one profile per user.
#[derive(Clone)]
pub struct ProfilesTable {
    adapter: PersistenceAdapter,
    table: String,
}

impl ProfilesTable {
    pub fn new(adapter: PersistenceAdapter, table: impl Into<String>) -> Self {
        Self {
            adapter,
            table: table.into(),
        }
    }
}

#[async_trait]
impl ProfileRepository for ProfilesTable {
    async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>> {
        self.adapter
            .get_by_key(&self.table, &keys::user_key(user_id))
            .await?
            .map(|record| from_record(ENTITY, record))
            .transpose()
    }

    async fn put_profile(&self, profile: &Profile) -> Result<()> {
        let record = to_record(ENTITY, profile)?;
        self.adapter.put(&self.table, &record).await
    }
}
