//! Entity types and API request payloads (Functional Core - pure data).

mod error;
mod requests;
mod types;

pub use error::ValidationError;
pub use requests::{
    CreateLikeRequest, CreateMatchRequest, CreateMessageRequest, UpdateMatchRequest,
    UpdateProfileRequest,
};
pub use types::{sort_messages, Like, Match, Message, Profile, User};
