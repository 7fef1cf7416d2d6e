//! Activity streak bookkeeping

use chrono::{DateTime, Utc};
use fitness_tracker_shared::{Streak, StreakResponse, User};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::error::ApiError;
use crate::repositories::UserRepository;
use crate::services::events::{EventKind, EventPublisher};

pub struct StreakService;

impl StreakService {
    pub async fn get(pool: &PgPool, user_id: Uuid) -> Result<StreakResponse, ApiError> {
        let user = UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        Ok(StreakResponse {
            streak: user.streak,
            last_active: user.last_active,
        })
    }

    /// Apply one activity event (login, workout completion, progress update)
    pub async fn record_activity(
        pool: &PgPool,
        events: &EventPublisher,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Streak, ApiError> {
        let user = UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        let current = User::from(user).streak();
        let (next, transition) = current.record_activity(now);

        UserRepository::update_streak(pool, user_id, next)
            .await
            .map_err(ApiError::Internal)?;

        metrics::counter!("activity_events_total", "transition" => transition.as_str()).increment(1);
        debug!(user_id = %user_id, streak = next.count, transition = transition.as_str(), "Recorded activity");

        if next.count != current.count {
            events.publish(
                user_id,
                EventKind::StreakChanged {
                    streak: next.count,
                    transition,
                },
            );
        }

        Ok(next)
    }
}
