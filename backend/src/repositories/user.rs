//! Accounts and body profiles

use anyhow::Result;
use chrono::{DateTime, Utc};
use fitness_tracker_shared::{ProfileInput, Streak, User};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use super::{decimal_from_f64, decimal_to_f64};

/// User record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub streak: i32,
    pub last_active: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRecord> for User {
    fn from(r: UserRecord) -> Self {
        User {
            id: r.id,
            email: r.email,
            name: r.name,
            password_hash: r.password_hash,
            streak: r.streak,
            last_active: r.last_active,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Profile record; enum columns are stored as text
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileRecord {
    pub user_id: Uuid,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub height_cm: Option<Decimal>,
    pub weight_kg: Option<Decimal>,
    pub fitness_level: Option<String>,
    pub goals: Option<String>,
    pub activity_level: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl ProfileRecord {
    /// Typed view of the stored profile. Unrecognized enum values read as missing.
    pub fn to_input(&self) -> ProfileInput {
        ProfileInput {
            age: self.age,
            gender: self.gender.as_deref().and_then(|g| g.parse().ok()),
            height_cm: self.height_cm.and_then(decimal_to_f64),
            weight_kg: self.weight_kg.and_then(decimal_to_f64),
            fitness_level: self.fitness_level.as_deref().and_then(|l| l.parse().ok()),
            goals: self.goals.clone(),
            activity_level: self.activity_level.as_deref().and_then(|l| l.parse().ok()),
        }
    }
}

/// Input for account creation
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub profile: ProfileInput,
}

const USER_COLUMNS: &str =
    "id, email, name, password_hash, streak, last_active, created_at, updated_at";
const PROFILE_COLUMNS: &str =
    "user_id, age, gender, height_cm, weight_kg, fitness_level, goals, activity_level, updated_at";

pub struct UserRepository;

impl UserRepository {
    /// Create an account together with its profile row
    pub async fn create(pool: &PgPool, input: NewUser) -> Result<UserRecord> {
        let mut tx = pool.begin().await?;

        let user = sqlx::query_as::<_, UserRecord>(&format!(
            "INSERT INTO users (email, name, password_hash) VALUES ($1, $2, $3) RETURNING {}",
            USER_COLUMNS
        ))
        .bind(&input.email)
        .bind(&input.name)
        .bind(&input.password_hash)
        .fetch_one(&mut *tx)
        .await?;

        let p = &input.profile;
        sqlx::query(
            r#"
            INSERT INTO user_profiles
                (user_id, age, gender, height_cm, weight_kg, fitness_level, goals, activity_level)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.id)
        .bind(p.age)
        .bind(p.gender.map(|g| g.as_str()))
        .bind(p.height_cm.and_then(decimal_from_f64))
        .bind(p.weight_kg.and_then(decimal_from_f64))
        .bind(p.fitness_level.map(|l| l.as_str()))
        .bind(p.goals.as_deref())
        .bind(p.activity_level.map(|l| l.as_str()))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(user)
    }

    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)",
        )
        .bind(email)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    pub async fn get_profile(pool: &PgPool, user_id: Uuid) -> Result<Option<ProfileRecord>> {
        let profile = sqlx::query_as::<_, ProfileRecord>(&format!(
            "SELECT {} FROM user_profiles WHERE user_id = $1",
            PROFILE_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(profile)
    }

    /// Apply the provided fields, leaving the rest untouched
    pub async fn update_profile(
        pool: &PgPool,
        user_id: Uuid,
        updates: &ProfileInput,
    ) -> Result<ProfileRecord> {
        let profile = sqlx::query_as::<_, ProfileRecord>(&format!(
            r#"
            INSERT INTO user_profiles AS p
                (user_id, age, gender, height_cm, weight_kg, fitness_level, goals, activity_level)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (user_id) DO UPDATE SET
                age = COALESCE($2, p.age),
                gender = COALESCE($3, p.gender),
                height_cm = COALESCE($4, p.height_cm),
                weight_kg = COALESCE($5, p.weight_kg),
                fitness_level = COALESCE($6, p.fitness_level),
                goals = COALESCE($7, p.goals),
                activity_level = COALESCE($8, p.activity_level),
                updated_at = NOW()
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        ))
        .bind(user_id)
        .bind(updates.age)
        .bind(updates.gender.map(|g| g.as_str()))
        .bind(updates.height_cm.and_then(decimal_from_f64))
        .bind(updates.weight_kg.and_then(decimal_from_f64))
        .bind(updates.fitness_level.map(|l| l.as_str()))
        .bind(updates.goals.as_deref())
        .bind(updates.activity_level.map(|l| l.as_str()))
        .fetch_one(pool)
        .await?;

        Ok(profile)
    }

    pub async fn update_streak(pool: &PgPool, user_id: Uuid, streak: Streak) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET streak = $2, last_active = $3, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(streak.count)
        .bind(streak.last_active)
        .execute(pool)
        .await?;

        Ok(())
    }
}
