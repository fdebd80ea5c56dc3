pub mod error;
pub mod health;
pub mod likes;
pub mod matches;
pub mod messages;
pub mod profiles;

use axum::Json;
use serde::Serialize;

pub use error::AppError;

/// Success body shared by the entity handlers.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub message: &'static str,
    pub data: T,
}

pub(crate) fn respond<T: Serialize>(message: &'static str, data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse { message, data })
}
