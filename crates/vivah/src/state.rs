//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. It holds one repository trait object per entity kind,
//! all built over a single [`PersistenceAdapter`].

use std::sync::Arc;

use vivah_auth::{AuthConfig, AuthFlow, AuthState, CredentialService, TokenService};
use vivah_core::storage::{
    LikeRepository, MatchRepository, MessageRepository, ProfileRepository, StoreClient,
    TableNames, UserRepository,
};

use crate::config::Config;
use crate::storage::{
    LikesTable, MatchesTable, MessagesTable, PersistenceAdapter, ProfilesTable, UsersTable,
};

/// Shared application state.
///
/// This is cloned for each request handler and contains shared resources
/// including repository trait objects for store access.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthState,
    pub profiles: Arc<dyn ProfileRepository>,
    pub matches: Arc<dyn MatchRepository>,
    pub likes: Arc<dyn LikeRepository>,
    pub messages: Arc<dyn MessageRepository>,
}

impl AppState {
    /// Creates the state over any store client.
    pub fn build(store: Arc<dyn StoreClient>, tables: &TableNames, auth_config: &AuthConfig) -> Self {
        let adapter = PersistenceAdapter::new(store);

        let users: Arc<dyn UserRepository> =
            Arc::new(UsersTable::new(adapter.clone(), &tables.users));
        let flow = AuthFlow::new(
            users,
            CredentialService::new(),
            TokenService::from_config(auth_config),
        );

        Self {
            auth: AuthState::new(flow),
            profiles: Arc::new(ProfilesTable::new(adapter.clone(), &tables.profiles)),
            matches: Arc::new(MatchesTable::new(adapter.clone(), &tables.matches)),
            likes: Arc::new(LikesTable::new(adapter.clone(), &tables.likes)),
            messages: Arc::new(MessagesTable::new(adapter, &tables.messages)),
        }
    }

    /// Creates the state for the storage backend selected at compile time.
    #[cfg(feature = "inmemory")]
    pub async fn from_config(config: &Config, auth_config: &AuthConfig) -> Self {
        use crate::storage::inmemory::InMemoryStore;

        tracing::warn!("Using the in-memory store; data is lost on restart");
        let store = InMemoryStore::new(&config.tables).with_page_size(config.query_page_size);
        Self::build(Arc::new(store), &config.tables, auth_config)
    }

    /// Creates the state for the storage backend selected at compile time.
    #[cfg(feature = "dynamodb")]
    pub async fn from_config(config: &Config, auth_config: &AuthConfig) -> Self {
        use crate::storage::dynamodb::DynamoDbStore;

        let store = DynamoDbStore::from_config(config).await;
        Self::build(Arc::new(store), &config.tables, auth_config)
    }
}

impl AsRef<AuthState> for AppState {
    fn as_ref(&self) -> &AuthState {
        &self.auth
    }
}
