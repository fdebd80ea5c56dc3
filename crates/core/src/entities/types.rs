use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// RFC 3339 timestamp as stored in records.
fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A registered account. Only the password hash is ever stored.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub email: String,
    pub password_hash: String,
}

impl User {
    pub fn new(
        user_id: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

/// Public dating profile, keyed by its owner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Date of birth, `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    /// Height in centimetres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Weight in kilograms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub civil_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interests: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifestyle: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub religion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Photo URLs, primary photo first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<String>>,
    pub updated_at: String,
}

impl Profile {
    /// An empty profile for `user_id`.
    pub fn new(user_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.into(),
            updated_at: timestamp(now),
            ..Default::default()
        }
    }
}

/// One side of a match. Mutual matches are stored once per participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub user_id: String,
    pub match_id: String,
    pub matched_user_id: String,
    pub matched_at: String,
}

impl Match {
    /// A new match owned by `user_id` with a server-generated `match_id`.
    pub fn new(
        user_id: impl Into<String>,
        matched_user_id: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            match_id: Uuid::new_v4().to_string(),
            matched_user_id: matched_user_id.into(),
            matched_at: timestamp(now),
        }
    }
}

/// A like given by `user_id` to `liked_user_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    pub user_id: String,
    pub liked_user_id: String,
    pub created_at: String,
}

impl Like {
    pub fn new(
        user_id: impl Into<String>,
        liked_user_id: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            liked_user_id: liked_user_id.into(),
            created_at: timestamp(now),
        }
    }
}

/// A chat message, stored under its sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub user_id: String,
    pub message_id: String,
    pub chat_id: String,
    pub content: String,
    pub sent_at: String,
}

impl Message {
    pub fn new(
        user_id: impl Into<String>,
        chat_id: impl Into<String>,
        content: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            message_id: Uuid::new_v4().to_string(),
            chat_id: chat_id.into(),
            content: content.into(),
            sent_at: timestamp(now),
        }
    }
}

/// Sort messages chronologically, breaking ties by message ID.
///
/// Timestamps share one fixed-width format, so string order is time order.
pub fn sort_messages(messages: &mut [Message]) {
    messages.sort_by(|a, b| {
        a.sent_at
            .cmp(&b.sent_at)
            .then_with(|| a.message_id.cmp(&b.message_id))
    });
}
