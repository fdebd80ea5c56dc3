//! Match handlers. A caller only sees the matches stored in their own
//! partition.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use chrono::Utc;
use vivah_auth::CurrentUser;
use vivah_core::entities::{CreateMatchRequest, Match, UpdateMatchRequest};

use super::{respond, ApiResponse, AppError};
use crate::state::AppState;

/// Create a match (POST /api/matches).
pub async fn create_match(
    CurrentUser(identity): CurrentUser,
    State(state): State<AppState>,
    payload: Result<Json<CreateMatchRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Match>>, AppError> {
    let Json(request) = payload?;
    request.validate()?;

    let m = request.into_match(&identity.user_id, Utc::now());
    state.matches.create_match(&m).await?;

    tracing::info!(user_id = %m.user_id, match_id = %m.match_id, "Created match");
    Ok(respond("Match created successfully", m))
}

/// List the caller's matches (GET /api/matches).
pub async fn list_matches(
    CurrentUser(identity): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Match>>>, AppError> {
    let matches = state.matches.list_matches_for_user(&identity.user_id).await?;
    Ok(respond("Matches retrieved", matches))
}

/// Get one of the caller's matches (GET /api/matches/{match_id}).
pub async fn get_match(
    CurrentUser(identity): CurrentUser,
    State(state): State<AppState>,
    Path(match_id): Path<String>,
) -> Result<Json<ApiResponse<Match>>, AppError> {
    let m = state
        .matches
        .get_match(&identity.user_id, &match_id)
        .await?
        .ok_or(AppError::NotFound("match"))?;

    Ok(respond("Match retrieved", m))
}

/// Re-point one of the caller's matches (PUT /api/matches/{match_id}).
pub async fn update_match(
    CurrentUser(identity): CurrentUser,
    State(state): State<AppState>,
    Path(match_id): Path<String>,
    payload: Result<Json<UpdateMatchRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Match>>, AppError> {
    let Json(request) = payload?;
    request.validate()?;

    let existing = state
        .matches
        .get_match(&identity.user_id, &match_id)
        .await?
        .ok_or(AppError::NotFound("match"))?;

    let updated = request.apply(existing, Utc::now());
    state.matches.update_match(&updated).await?;

    tracing::info!(user_id = %updated.user_id, match_id = %updated.match_id, "Updated match");
    Ok(respond("Match updated successfully", updated))
}
