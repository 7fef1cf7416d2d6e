//! Profile routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::ProfileService;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use fitness_tracker_shared::{ProfileResponse, ProfileUpdateResponse, UpdateProfileRequest};

pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/", get(get_profile).put(update_profile))
}

/// GET /api/v1/profile
async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ProfileResponse>> {
    let profile = ProfileService::get(state.db(), auth.user_id).await?;
    Ok(Json(profile))
}

/// PUT /api/v1/profile
///
/// Partial update. The plan is rebuilt from the stored profile and returned
/// alongside it.
async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<ProfileUpdateResponse>> {
    let updated =
        ProfileService::update(state.db(), state.plans(), state.events(), auth.user_id, req)
            .await?;
    Ok(Json(updated))
}
