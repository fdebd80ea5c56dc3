//! API request payloads.
//!
//! The acting user never appears in a payload; handlers take it from the
//! verified session token.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::{Like, Match, Message, Profile, ValidationError};

fn require(fields: &[(&'static str, &str)]) -> Result<(), ValidationError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::missing(&missing))
    }
}

/// Partial profile update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
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
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<String>>,
}

impl UpdateProfileRequest {
    /// Whether the request carries no field at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError("no profile fields to update".to_string()));
        }
        for (field, value) in [("height", self.height), ("weight", self.weight)] {
            if value.is_some_and(|v| !v.is_finite() || v <= 0.0) {
                return Err(ValidationError(format!("{field} must be a positive number")));
            }
        }
        Ok(())
    }

    /// Merge the update into the stored profile, or into a fresh one.
    pub fn apply(self, user_id: &str, existing: Option<Profile>, now: DateTime<Utc>) -> Profile {
        let mut profile = existing.unwrap_or_else(|| Profile::new(user_id, now));

        profile.name = self.name.or(profile.name);
        profile.dob = self.dob.or(profile.dob);
        profile.sex = self.sex.or(profile.sex);
        profile.height = self.height.or(profile.height);
        profile.weight = self.weight.or(profile.weight);
        profile.civil_status = self.civil_status.or(profile.civil_status);
        profile.interests = self.interests.or(profile.interests);
        profile.lifestyle = self.lifestyle.or(profile.lifestyle);
        profile.religion = self.religion.or(profile.religion);
        profile.location = self.location.or(profile.location);
        profile.bio = self.bio.or(profile.bio);
        profile.photos = self.photos.or(profile.photos);

        profile.updated_at = now.to_rfc3339_opts(SecondsFormat::Millis, true);
        profile
    }
}

/// Request payload for creating a match with another user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMatchRequest {
    #[serde(default)]
    pub matched_user_id: String,
}

impl CreateMatchRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&[("matched_user_id", self.matched_user_id.as_str())])
    }

    pub fn into_match(self, user_id: &str, now: DateTime<Utc>) -> Match {
        Match::new(user_id, self.matched_user_id, now)
    }
}

/// Request payload for re-pointing an existing match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateMatchRequest {
    #[serde(default)]
    pub matched_user_id: String,
}

impl UpdateMatchRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&[("matched_user_id", self.matched_user_id.as_str())])
    }

    /// Apply to a stored match, keeping its owner and ID.
    pub fn apply(self, existing: Match, now: DateTime<Utc>) -> Match {
        Match {
            matched_user_id: self.matched_user_id,
            matched_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            ..existing
        }
    }
}

/// Request payload for liking another user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLikeRequest {
    #[serde(default)]
    pub liked_user_id: String,
}

impl CreateLikeRequest {
    /// Reject empty targets and self-likes.
    pub fn validate(&self, user_id: &str) -> Result<(), ValidationError> {
        require(&[("liked_user_id", self.liked_user_id.as_str())])?;
        if self.liked_user_id == user_id {
            return Err(ValidationError("cannot like yourself".to_string()));
        }
        Ok(())
    }

    pub fn into_like(self, user_id: &str, now: DateTime<Utc>) -> Like {
        Like::new(user_id, self.liked_user_id, now)
    }
}

/// Request payload for sending a chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMessageRequest {
    #[serde(default)]
    pub chat_id: String,
    #[serde(default)]
    pub content: String,
}

impl CreateMessageRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&[("chat_id", self.chat_id.as_str()), ("content", self.content.as_str())])
    }

    pub fn into_message(self, user_id: &str, now: DateTime<Utc>) -> Message {
        Message::new(user_id, self.chat_id, self.content, now)
    }
}
