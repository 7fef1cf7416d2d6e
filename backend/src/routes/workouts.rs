//! Workout routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::WorkoutService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use fitness_tracker_shared::{CreateWorkoutRequest, DateRangeQuery, Workout};
use uuid::Uuid;

pub fn workout_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_workouts).post(create_workout))
        .route("/:id/complete", post(complete_workout))
}

/// POST /api/v1/workouts
async fn create_workout(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateWorkoutRequest>,
) -> ApiResult<(StatusCode, Json<Workout>)> {
    let workout = WorkoutService::create(state.db(), auth.user_id, req, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(workout)))
}

/// GET /api/v1/workouts?start=YYYY-MM-DD&end=YYYY-MM-DD
async fn list_workouts(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<DateRangeQuery>,
) -> ApiResult<Json<Vec<Workout>>> {
    let workouts = WorkoutService::list(state.db(), auth.user_id, &query, Utc::now()).await?;
    Ok(Json(workouts))
}

/// POST /api/v1/workouts/:id/complete
async fn complete_workout(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Workout>> {
    let workout =
        WorkoutService::complete(state.db(), state.events(), auth.user_id, id, Utc::now()).await?;
    Ok(Json(workout))
}
