//! Daily progress rows, keyed by (user_id, date)

use anyhow::Result;
use chrono::NaiveDate;
use fitness_tracker_shared::{DailyProgress, ProgressSource, ProgressUpdateRequest};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use super::{decimal_from_f64, decimal_to_f64};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProgressRecord {
    pub date: NaiveDate,
    pub steps: i32,
    pub calories_consumed: i32,
    pub calories_burned: i32,
    pub water_intake_ml: i32,
    pub workouts_completed: i32,
    pub weight_kg: Option<Decimal>,
    pub heart_rate: Option<i32>,
    pub sleep_hours: Option<Decimal>,
}

impl From<ProgressRecord> for DailyProgress {
    fn from(r: ProgressRecord) -> Self {
        DailyProgress {
            date: r.date,
            steps: r.steps,
            calories_consumed: r.calories_consumed,
            calories_burned: r.calories_burned,
            water_intake: r.water_intake_ml,
            workouts_completed: r.workouts_completed,
            weight: r.weight_kg.and_then(decimal_to_f64),
            heart_rate: r.heart_rate,
            sleep_hours: r.sleep_hours.and_then(decimal_to_f64),
            source: ProgressSource::Tracked,
        }
    }
}

const COLUMNS: &str = "date, steps, calories_consumed, calories_burned, water_intake_ml, \
                       workouts_completed, weight_kg, heart_rate, sleep_hours";

pub struct ProgressRepository;

impl ProgressRepository {
    pub async fn find_for_date(
        pool: &PgPool,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<DailyProgress>> {
        let record = sqlx::query_as::<_, ProgressRecord>(&format!(
            "SELECT {} FROM daily_progress WHERE user_id = $1 AND date = $2",
            COLUMNS
        ))
        .bind(user_id)
        .bind(date)
        .fetch_optional(pool)
        .await?;

        Ok(record.map(Into::into))
    }

    /// Create the day's row or update only the provided fields
    pub async fn upsert(
        pool: &PgPool,
        user_id: Uuid,
        date: NaiveDate,
        update: &ProgressUpdateRequest,
    ) -> Result<DailyProgress> {
        let record = sqlx::query_as::<_, ProgressRecord>(&format!(
            r#"
            INSERT INTO daily_progress AS d
                (user_id, date, steps, calories_consumed, calories_burned, water_intake_ml,
                 workouts_completed, weight_kg, heart_rate, sleep_hours)
            VALUES ($1, $2, COALESCE($3, 0), COALESCE($4, 0), COALESCE($5, 0), COALESCE($6, 0),
                    COALESCE($7, 0), $8, $9, $10)
            ON CONFLICT (user_id, date) DO UPDATE SET
                steps = COALESCE($3, d.steps),
                calories_consumed = COALESCE($4, d.calories_consumed),
                calories_burned = COALESCE($5, d.calories_burned),
                water_intake_ml = COALESCE($6, d.water_intake_ml),
                workouts_completed = COALESCE($7, d.workouts_completed),
                weight_kg = COALESCE($8, d.weight_kg),
                heart_rate = COALESCE($9, d.heart_rate),
                sleep_hours = COALESCE($10, d.sleep_hours),
                updated_at = NOW()
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(user_id)
        .bind(date)
        .bind(update.steps)
        .bind(update.calories_consumed)
        .bind(update.calories_burned)
        .bind(update.water_intake)
        .bind(update.workouts_completed)
        .bind(update.weight.and_then(decimal_from_f64))
        .bind(update.heart_rate)
        .bind(update.sleep_hours.and_then(decimal_from_f64))
        .fetch_one(pool)
        .await?;

        Ok(record.into())
    }

    /// Count one completed workout and its calories toward the day
    pub async fn add_completed_workout(
        pool: &PgPool,
        user_id: Uuid,
        date: NaiveDate,
        calories_burned: i32,
    ) -> Result<DailyProgress> {
        let record = sqlx::query_as::<_, ProgressRecord>(&format!(
            r#"
            INSERT INTO daily_progress AS d (user_id, date, workouts_completed, calories_burned)
            VALUES ($1, $2, 1, $3)
            ON CONFLICT (user_id, date) DO UPDATE SET
                workouts_completed = d.workouts_completed + 1,
                calories_burned = d.calories_burned + $3,
                updated_at = NOW()
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(user_id)
        .bind(date)
        .bind(calories_burned)
        .fetch_one(pool)
        .await?;

        Ok(record.into())
    }

    /// Rows between `start` and `end` inclusive, oldest first
    pub async fn list_range(
        pool: &PgPool,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyProgress>> {
        let records = sqlx::query_as::<_, ProgressRecord>(&format!(
            r#"
            SELECT {} FROM daily_progress
            WHERE user_id = $1 AND date BETWEEN $2 AND $3
            ORDER BY date ASC
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
}
