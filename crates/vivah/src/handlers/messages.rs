//! Chat message handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use chrono::Utc;
use vivah_auth::CurrentUser;
use vivah_core::entities::{CreateMessageRequest, Message};

use super::{respond, ApiResponse, AppError};
use crate::state::AppState;

/// Send a message to a chat (POST /api/messages).
pub async fn create_message(
    CurrentUser(identity): CurrentUser,
    State(state): State<AppState>,
    payload: Result<Json<CreateMessageRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Message>>, AppError> {
    let Json(request) = payload?;
    request.validate()?;

    let message = request.into_message(&identity.user_id, Utc::now());
    state.messages.create_message(&message).await?;

    tracing::debug!(
        user_id = %message.user_id,
        chat_id = %message.chat_id,
        message_id = %message.message_id,
        "Stored message"
    );
    Ok(respond("Message sent successfully", message))
}

/// Get one of the caller's own messages (GET /api/messages/{message_id}).
pub async fn get_message(
    CurrentUser(identity): CurrentUser,
    State(state): State<AppState>,
    Path(message_id): Path<String>,
) -> Result<Json<ApiResponse<Message>>, AppError> {
    let message = state
        .messages
        .get_message(&identity.user_id, &message_id)
        .await?
        .ok_or(AppError::NotFound("message"))?;

    Ok(respond("Message retrieved", message))
}

/// List a chat's messages in send order (GET /api/chats/{chat_id}/messages).
///
/// A chat without messages is an empty list, not a 404.
pub async fn list_chat_messages(
    CurrentUser(_): CurrentUser,
    State(state): State<AppState>,
    Path(chat_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<Message>>>, AppError> {
    let messages = state.messages.list_messages_for_chat(&chat_id).await?;
    Ok(respond("Messages retrieved", messages))
}
