//! Streak routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::StreakService;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use fitness_tracker_shared::StreakResponse;

pub fn streak_routes() -> Router<AppState> {
    Router::new().route("/", get(get_streak))
}

/// GET /api/v1/streak
async fn get_streak(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<StreakResponse>> {
    let streak = StreakService::get(state.db(), auth.user_id).await?;
    Ok(Json(streak))
}
