//! Daily progress routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::ProgressService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use fitness_tracker_shared::{
    DailyProgress, DateRangeQuery, ProgressSummary, ProgressUpdateRequest,
};

pub fn progress_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_progress))
        .route("/today", get(get_today).put(update_today))
        .route("/summary", get(summary))
}

/// GET /api/v1/progress/today
///
/// Tracked record when one exists for today, otherwise a placeholder with
/// `source: "placeholder"`.
async fn get_today(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<DailyProgress>> {
    let progress = ProgressService::today(state.db(), auth.user_id, Utc::now()).await?;
    Ok(Json(progress))
}

/// PUT /api/v1/progress/today
async fn update_today(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ProgressUpdateRequest>,
) -> ApiResult<Json<DailyProgress>> {
    let progress =
        ProgressService::update_today(state.db(), state.events(), auth.user_id, req, Utc::now())
            .await?;
    Ok(Json(progress))
}

/// GET /api/v1/progress?start=YYYY-MM-DD&end=YYYY-MM-DD
async fn list_progress(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<DateRangeQuery>,
) -> ApiResult<Json<Vec<DailyProgress>>> {
    let records = ProgressService::range(state.db(), auth.user_id, &query, Utc::now()).await?;
    Ok(Json(records))
}

/// GET /api/v1/progress/summary
async fn summary(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<DateRangeQuery>,
) -> ApiResult<Json<ProgressSummary>> {
    let summary = ProgressService::summary(state.db(), auth.user_id, &query, Utc::now()).await?;
    Ok(Json(summary))
}
