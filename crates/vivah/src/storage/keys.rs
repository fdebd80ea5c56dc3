//! Primary key records.
//!
//! Pure functions building the key of each table from an entity's logical
//! fields. Only the repositories call these.

use serde_json::Value;
use vivah_core::storage::{Record, LIKED_USER_ID, MATCH_ID, MESSAGE_ID, USER_ID};

fn key(fields: &[(&str, &str)]) -> Record {
    fields
        .iter()
        .map(|(name, value)| (name.to_string(), Value::String(value.to_string())))
        .collect()
}

/// Key of a user or a profile.
///
/// Pattern: `{user_id}`
pub fn user_key(user_id: &str) -> Record {
    key(&[(USER_ID, user_id)])
}

/// Key of a match.
///
/// Pattern: `{user_id, match_id}`
pub fn match_key(user_id: &str, match_id: &str) -> Record {
    key(&[(USER_ID, user_id), (MATCH_ID, match_id)])
}

/// Key of a like.
///
/// Pattern: `{user_id, liked_user_id}`
pub fn like_key(user_id: &str, liked_user_id: &str) -> Record {
    key(&[(USER_ID, user_id), (LIKED_USER_ID, liked_user_id)])
}

/// Key of a message.
///
/// Pattern: `{user_id, message_id}`
pub fn message_key(user_id: &str, message_id: &str) -> Record {
    key(&[(USER_ID, user_id), (MESSAGE_ID, message_id)])
}
