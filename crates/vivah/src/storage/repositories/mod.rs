//! Repository implementations over the [`PersistenceAdapter`].
//!
//! Each repository binds the adapter to one table and owns the mapping from
//! its entity's fields to that table's key attributes.

mod likes;
mod matches;
mod messages;
mod profiles;
mod users;

pub use likes::LikesTable;
pub use matches::MatchesTable;
pub use messages::MessagesTable;
pub use profiles::ProfilesTable;
pub use users::UsersTable;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use vivah_core::storage::TableNames;

    use crate::storage::{inmemory::InMemoryStore, PersistenceAdapter};

    pub fn adapter() -> (PersistenceAdapter, InMemoryStore, TableNames) {
        let names = TableNames::default();
        let store = InMemoryStore::new(&names).with_page_size(2);
        (PersistenceAdapter::new(Arc::new(store.clone())), store, names)
    }
}
