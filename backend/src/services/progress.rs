//! Daily progress: tracked records, placeholders and summaries

use chrono::{DateTime, Utc};
use fitness_tracker_shared::progress::{placeholder_progress, summarize};
use fitness_tracker_shared::{
    DailyProgress, DateRangeQuery, ProgressSummary, ProgressUpdateRequest,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::repositories::ProgressRepository;
use crate::services::events::{EventKind, EventPublisher};
use crate::services::plan::PlanService;
use crate::services::streak::StreakService;

pub struct ProgressService;

impl ProgressService {
    /// Today's tracked record, or a fresh placeholder that is not stored
    pub async fn today(
        pool: &PgPool,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<DailyProgress, ApiError> {
        let profile = PlanService::load_profile(pool, user_id).await?;

        let stored = ProgressRepository::find_for_date(pool, user_id, now.date_naive())
            .await
            .map_err(ApiError::Internal)?
            .filter(|p| !p.is_stale(now));

        Ok(stored.unwrap_or_else(|| {
            placeholder_progress(&mut rand::thread_rng(), now, profile.weight_kg)
        }))
    }

    /// Upsert today's record with the provided fields
    pub async fn update_today(
        pool: &PgPool,
        events: &EventPublisher,
        user_id: Uuid,
        update: ProgressUpdateRequest,
        now: DateTime<Utc>,
    ) -> Result<DailyProgress, ApiError> {
        update.validate()?;
        if update.is_empty() {
            return Err(ApiError::BadRequest("No progress fields provided".to_string()));
        }

        let date = now.date_naive();
        let progress = ProgressRepository::upsert(pool, user_id, date, &update)
            .await
            .map_err(ApiError::Internal)?;

        StreakService::record_activity(pool, events, user_id, now).await?;
        events.publish(user_id, EventKind::ProgressUpdated { date });

        Ok(progress)
    }

    pub async fn range(
        pool: &PgPool,
        user_id: Uuid,
        query: &DateRangeQuery,
        now: DateTime<Utc>,
    ) -> Result<Vec<DailyProgress>, ApiError> {
        let (start, end) = query.resolve(now.date_naive())?;
        ProgressRepository::list_range(pool, user_id, start, end)
            .await
            .map_err(ApiError::Internal)
    }

    pub async fn summary(
        pool: &PgPool,
        user_id: Uuid,
        query: &DateRangeQuery,
        now: DateTime<Utc>,
    ) -> Result<ProgressSummary, ApiError> {
        let (start, end) = query.resolve(now.date_naive())?;
        let records = ProgressRepository::list_range(pool, user_id, start, end)
            .await
            .map_err(ApiError::Internal)?;

        Ok(summarize(start, end, &records))
    }
}
