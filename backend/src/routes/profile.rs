//! Profile API routes

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use nutrition_planner_shared::{ProfileResponse, UpdateProfileRequest};

/// Create profile routes
pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/", get(get_profile).put(update_profile))
}

/// GET /api/v1/profile - Get profile and planning readiness
async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = state.profiles.get_profile(auth.user_id).await?;
    Ok(Json(profile))
}

/// PUT /api/v1/profile - Partially update profile
async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = state.profiles.update_profile(auth.user_id, req).await?;
    Ok(Json(profile))
}
