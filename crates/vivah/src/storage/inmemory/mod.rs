//! In-memory storage backend for development and testing.
//!
//! Tables live in `BTreeMap`s wrapped in `Arc<RwLock<_>>`, ordered by primary
//! key the way DynamoDB orders a partition. Data is lost when the store is
//! dropped.
//!
//! # Example
//!
//! ```rust,ignore
//! use vivah_core::storage::TableNames;
//!
//! let store = InMemoryStore::new(&TableNames::default()).with_page_size(10);
//! store.set_unavailable(true); // every call now fails with `Unavailable`
//! ```

mod store;

pub use store::InMemoryStore;
