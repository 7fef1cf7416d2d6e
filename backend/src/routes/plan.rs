//! Fitness plan routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::PlanService;
use crate::state::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use fitness_tracker_shared::{DailyTargets, FitnessPlan};

pub fn plan_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_plan))
        .route("/regenerate", post(regenerate))
        .route("/targets", get(targets))
}

/// GET /api/v1/plan
async fn get_plan(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<FitnessPlan>> {
    let plan = PlanService::get(state.db(), state.plans(), auth.user_id).await?;
    Ok(Json(plan))
}

/// POST /api/v1/plan/regenerate
async fn regenerate(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<FitnessPlan>> {
    let plan =
        PlanService::regenerate(state.db(), state.plans(), state.events(), auth.user_id).await?;
    Ok(Json(plan))
}

/// GET /api/v1/plan/targets
async fn targets(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<DailyTargets>> {
    let targets = PlanService::targets(state.db(), state.plans(), auth.user_id).await?;
    Ok(Json(targets))
}
