//! Stored fitness plans (one JSONB document per user)

use anyhow::Result;
use fitness_tracker_shared::FitnessPlan;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

pub struct PlanRepository;

impl PlanRepository {
    pub async fn find(pool: &PgPool, user_id: Uuid) -> Result<Option<FitnessPlan>> {
        let plan = sqlx::query_scalar::<_, Json<FitnessPlan>>(
            "SELECT plan FROM fitness_plans WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(plan.map(|Json(p)| p))
    }

    /// Insert or replace the user's plan
    pub async fn upsert(pool: &PgPool, user_id: Uuid, plan: &FitnessPlan) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO fitness_plans (user_id, plan, source, generated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) DO UPDATE SET
                plan = EXCLUDED.plan,
                source = EXCLUDED.source,
                generated_at = EXCLUDED.generated_at
            "#,
        )
        .bind(user_id)
        .bind(Json(plan))
        .bind(plan.source.as_str())
        .bind(plan.last_updated)
        .execute(pool)
        .await?;

        Ok(())
    }
}
