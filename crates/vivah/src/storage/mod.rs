//! Storage backend implementations.
//!
//! This module provides the [`PersistenceAdapter`], the repositories built on
//! it, and the concrete [`StoreClient`](vivah_core::storage::StoreClient)
//! backends. The backend is selected at compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): in-memory store, for development and tests
//! - `dynamodb`: AWS DynamoDB store using `aws-sdk-dynamodb`
//!
//! These features are mutually exclusive - only one storage backend can be
//! enabled at a time.
//!
//! # Examples
//!
//! Build with the in-memory store (default):
//! ```bash
//! cargo build -p vivah
//! ```
//!
//! Build with DynamoDB:
//! ```bash
//! cargo build -p vivah --no-default-features --features dynamodb
//! ```

// Compile-time checks for mutual exclusivity
#[cfg(all(feature = "inmemory", feature = "dynamodb"))]
compile_error!(
    "Features 'inmemory' and 'dynamodb' are mutually exclusive. \
    Enable only one storage backend at a time."
);

#[cfg(not(any(feature = "inmemory", feature = "dynamodb")))]
compile_error!(
    "No storage backend selected. Enable 'inmemory' or 'dynamodb' feature. \
    Example: cargo build -p vivah --features dynamodb"
);

mod adapter;
mod keys;
mod repositories;

#[cfg(any(feature = "inmemory", test))]
pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

pub use adapter::PersistenceAdapter;
pub use repositories::{LikesTable, MatchesTable, MessagesTable, ProfilesTable, UsersTable};
