use async_trait::async_trait;

use crate::entities::{Like, Match, Message, Profile, User};

use super::{Item, KeyCondition, QueryPage, Result};

/// Facade over the key-value store's put/get/query operations.
///
/// Implementations map every transport failure to
/// [`StorageError::Unavailable`](super::StorageError::Unavailable).
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// Writes an item, replacing any item with the same primary key.
    async fn put_item(&self, table: &str, item: Item) -> Result<()>;

    /// Reads the item with the given primary key. `None` when absent.
    async fn get_item(&self, table: &str, key: Item) -> Result<Option<Item>>;

    /// Fetches one page of items matching `condition`, either on the base
    /// table (`index == None`) or on the named secondary index.
    async fn query(
        &self,
        table: &str,
        index: Option<&str>,
        condition: &KeyCondition,
        exclusive_start_key: Option<Item>,
    ) -> Result<QueryPage>;
}

/// Repository for user operations.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates a new user.
    async fn create_user(&self, user: &User) -> Result<()>;

    /// Gets a user by their email address.
    ///
    /// Emails are not unique at write time; the first user in store order is
    /// returned when several share the address.
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
}

/// Repository for profile operations.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Gets the profile of a user.
    async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>>;

    /// Creates or overwrites a profile.
    async fn put_profile(&self, profile: &Profile) -> Result<()>;
}

/// Repository for match operations.
#[async_trait]
pub trait MatchRepository: Send + Sync {
    /// Creates a new match.
    async fn create_match(&self, m: &Match) -> Result<()>;

    /// Gets a match by owner and match ID.
    async fn get_match(&self, user_id: &str, match_id: &str) -> Result<Option<Match>>;

    /// Overwrites an existing match.
    async fn update_match(&self, m: &Match) -> Result<()>;

    /// Lists every match owned by a user.
    async fn list_matches_for_user(&self, user_id: &str) -> Result<Vec<Match>>;
}

/// Repository for like operations.
#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Records a like.
    async fn create_like(&self, like: &Like) -> Result<()>;

    /// Gets the like from `user_id` to `liked_user_id`, if any.
    async fn get_like(&self, user_id: &str, liked_user_id: &str) -> Result<Option<Like>>;

    /// Lists every like given by a user.
    async fn list_likes_for_user(&self, user_id: &str) -> Result<Vec<Like>>;
}

/// Repository for message operations.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Stores a message.
    async fn create_message(&self, message: &Message) -> Result<()>;

    /// Gets a message by sender and message ID.
    async fn get_message(&self, user_id: &str, message_id: &str) -> Result<Option<Message>>;

    /// Lists every message of a chat.
    async fn list_messages_for_chat(&self, chat_id: &str) -> Result<Vec<Message>>;
}
