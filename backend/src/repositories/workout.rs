//! Workout log

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use fitness_tracker_shared::{ExerciseRecord, NewWorkout, Workout};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WorkoutRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub workout_type: String,
    pub exercises: Json<Vec<ExerciseRecord>>,
    pub duration_minutes: i32,
    pub calories_burned: i32,
    pub scheduled_for: NaiveDate,
    pub completed_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<WorkoutRecord> for Workout {
    fn from(r: WorkoutRecord) -> Self {
        Workout {
            id: r.id,
            user_id: r.user_id,
            name: r.name,
            workout_type: r.workout_type,
            exercises: r.exercises.0,
            duration_minutes: r.duration_minutes,
            calories_burned: r.calories_burned,
            scheduled_for: r.scheduled_for,
            completed_at: r.completed_at,
            notes: r.notes,
            created_at: r.created_at,
        }
    }
}

const COLUMNS: &str = "id, user_id, name, workout_type, exercises, duration_minutes, \
                       calories_burned, scheduled_for, completed_at, notes, created_at";

pub struct WorkoutRepository;

impl WorkoutRepository {
    pub async fn create(pool: &PgPool, user_id: Uuid, input: &NewWorkout) -> Result<Workout> {
        let record = sqlx::query_as::<_, WorkoutRecord>(&format!(
            r#"
            INSERT INTO workouts
                (user_id, name, workout_type, exercises, duration_minutes, calories_burned,
                 scheduled_for, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(user_id)
        .bind(&input.name)
        .bind(&input.workout_type)
        .bind(Json(&input.exercises))
        .bind(input.duration_minutes)
        .bind(input.calories_burned)
        .bind(input.scheduled_for)
        .bind(input.notes.as_deref())
        .fetch_one(pool)
        .await?;

        Ok(record.into())
    }

    pub async fn find_by_id(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<Option<Workout>> {
        let record = sqlx::query_as::<_, WorkoutRecord>(&format!(
            "SELECT {} FROM workouts WHERE id = $1 AND user_id = $2",
            COLUMNS
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(record.map(Into::into))
    }

    pub async fn list_range(
        pool: &PgPool,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Workout>> {
        let records = sqlx::query_as::<_, WorkoutRecord>(&format!(
            r#"
            SELECT {} FROM workouts
            WHERE user_id = $1 AND scheduled_for BETWEEN $2 AND $3
            ORDER BY scheduled_for ASC, created_at ASC
            "#,
            COLUMNS
        ))
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;

        Ok(records.into_iter().map(Into::into).collect())
    }

    /// Stamp `completed_at` once. Returns `None` if the workout doesn't exist
    /// or was already completed.
    pub async fn mark_completed(
        pool: &PgPool,
        user_id: Uuid,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<Option<Workout>> {
        let record = sqlx::query_as::<_, WorkoutRecord>(&format!(
            r#"
            UPDATE workouts SET completed_at = $3
            WHERE id = $1 AND user_id = $2 AND completed_at IS NULL
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(id)
        .bind(user_id)
        .bind(at)
        .fetch_optional(pool)
        .await?;

        Ok(record.map(Into::into))
    }
}
