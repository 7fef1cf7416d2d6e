//! Workout logging and completion

use chrono::{DateTime, Utc};
use fitness_tracker_shared::{CreateWorkoutRequest, DateRangeQuery, Workout};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;
use crate::repositories::{ProgressRepository, WorkoutRepository};
use crate::services::events::{EventKind, EventPublisher};
use crate::services::streak::StreakService;

pub struct WorkoutService;

impl WorkoutService {
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        request: CreateWorkoutRequest,
        now: DateTime<Utc>,
    ) -> Result<Workout, ApiError> {
        let workout = request.validate(now.date_naive())?;

        WorkoutRepository::create(pool, user_id, &workout)
            .await
            .map_err(ApiError::Internal)
    }

    pub async fn list(
        pool: &PgPool,
        user_id: Uuid,
        query: &DateRangeQuery,
        now: DateTime<Utc>,
    ) -> Result<Vec<Workout>, ApiError> {
        let (start, end) = query.resolve(now.date_naive())?;

        WorkoutRepository::list_range(pool, user_id, start, end)
            .await
            .map_err(ApiError::Internal)
    }

    /// Mark done, count it toward today's progress and the streak
    pub async fn complete(
        pool: &PgPool,
        events: &EventPublisher,
        user_id: Uuid,
        workout_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Workout, ApiError> {
        let workout = match WorkoutRepository::mark_completed(pool, user_id, workout_id, now)
            .await
            .map_err(ApiError::Internal)?
        {
            Some(workout) => workout,
            None => {
                let existing = WorkoutRepository::find_by_id(pool, user_id, workout_id)
                    .await
                    .map_err(ApiError::Internal)?;
                return Err(match existing {
                    Some(_) => ApiError::Conflict("Workout already completed".to_string()),
                    None => ApiError::NotFound("Workout not found".to_string()),
                });
            }
        };

        ProgressRepository::add_completed_workout(
            pool,
            user_id,
            now.date_naive(),
            workout.calories_burned,
        )
        .await
        .map_err(ApiError::Internal)?;

        StreakService::record_activity(pool, events, user_id, now).await?;

        events.publish(
            user_id,
            EventKind::WorkoutCompleted {
                workout_id: workout.id,
                calories_burned: workout.calories_burned,
            },
        );
        events.publish(
            user_id,
            EventKind::ProgressUpdated {
                date: now.date_naive(),
            },
        );

        info!(user_id = %user_id, workout_id = %workout.id, "Workout completed");
        Ok(workout)
    }
}
