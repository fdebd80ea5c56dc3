//! Profile handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use chrono::Utc;
use vivah_auth::CurrentUser;
use vivah_core::entities::{Profile, UpdateProfileRequest};

use super::{respond, ApiResponse, AppError};
use crate::state::AppState;

/// Get any user's profile (GET /api/profiles/{user_id}).
pub async fn get_profile(
    CurrentUser(_): CurrentUser,
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<Profile>>, AppError> {
    let profile = state
        .profiles
        .get_profile(&user_id)
        .await?
        .ok_or(AppError::NotFound("profile"))?;

    Ok(respond("Profile retrieved", profile))
}

/// Create or update the caller's own profile (PUT /api/profile).
pub async fn update_profile(
    CurrentUser(identity): CurrentUser,
    State(state): State<AppState>,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Profile>>, AppError> {
    let Json(request) = payload?;
    request.validate()?;

    let existing = state.profiles.get_profile(&identity.user_id).await?;
    let created = existing.is_none();
    let profile = request.apply(&identity.user_id, existing, Utc::now());
    state.profiles.put_profile(&profile).await?;

    tracing::info!(user_id = %identity.user_id, created, "Saved profile");
    Ok(respond("Profile updated successfully", profile))
}
