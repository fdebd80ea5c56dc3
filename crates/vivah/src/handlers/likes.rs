//! Like handlers.
//!
//! Liking a user who already liked the caller back creates a match on both
//! sides. Likes are append-only: liking the same user twice keeps the first
//! record.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use vivah_auth::CurrentUser;
use vivah_core::entities::{CreateLikeRequest, Like, Match};

use super::{respond, ApiResponse, AppError};
use crate::state::AppState;

/// Response body for a new like.
#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub message: &'static str,
    pub data: Like,
    /// Whether the like completed a mutual match.
    pub matched: bool,
}

/// Like another user (POST /api/likes).
pub async fn create_like(
    CurrentUser(identity): CurrentUser,
    State(state): State<AppState>,
    payload: Result<Json<CreateLikeRequest>, JsonRejection>,
) -> Result<Json<LikeResponse>, AppError> {
    let Json(request) = payload?;
    request.validate(&identity.user_id)?;

    let now = Utc::now();
    let existing = state
        .likes
        .get_like(&identity.user_id, &request.liked_user_id)
        .await?;
    let repeated = existing.is_some();
    let like = match existing {
        Some(like) => like,
        None => {
            let like = request.into_like(&identity.user_id, now);
            state.likes.create_like(&like).await?;
            like
        }
    };

    let reciprocal = state
        .likes
        .get_like(&like.liked_user_id, &like.user_id)
        .await?;
    let matched = match reciprocal {
        Some(_) => {
            record_mutual_match(&state, &like.user_id, &like.liked_user_id, now).await?;
            true
        }
        None => false,
    };

    tracing::info!(
        user_id = %like.user_id,
        liked_user_id = %like.liked_user_id,
        matched,
        repeated,
        "Created like"
    );

    Ok(Json(LikeResponse {
        message: match (matched, repeated) {
            (true, _) => "It's a match!",
            (false, true) => "Like already exists",
            (false, false) => "Like created successfully",
        },
        data: like,
        matched,
    }))
}

/// Store one match per side, unless `user_id` already holds one for `other`.
async fn record_mutual_match(
    state: &AppState,
    user_id: &str,
    other: &str,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    let existing = state.matches.list_matches_for_user(user_id).await?;
    if existing.iter().any(|m| m.matched_user_id == other) {
        tracing::debug!(user_id, other, "Match already recorded");
        return Ok(());
    }

    state.matches.create_match(&Match::new(user_id, other, now)).await?;
    state.matches.create_match(&Match::new(other, user_id, now)).await?;
    Ok(())
}

/// List the likes the caller has given (GET /api/likes).
pub async fn list_likes(
    CurrentUser(identity): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Like>>>, AppError> {
    let likes = state.likes.list_likes_for_user(&identity.user_id).await?;
    Ok(respond("Likes retrieved", likes))
}

/// Get the caller's like for a user (GET /api/likes/{liked_user_id}).
pub async fn get_like(
    CurrentUser(identity): CurrentUser,
    State(state): State<AppState>,
    Path(liked_user_id): Path<String>,
) -> Result<Json<ApiResponse<Like>>, AppError> {
    let like = state
        .likes
        .get_like(&identity.user_id, &liked_user_id)
        .await?
        .ok_or(AppError::NotFound("like"))?;

    Ok(respond("Like retrieved", like))
}
