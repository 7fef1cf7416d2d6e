//! Data models for the Fitness Tracker application

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::exercise::ExerciseRecord;
use crate::streak::Streak;

/// User account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub streak: i32,
    pub last_active: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn streak(&self) -> Streak {
        Streak {
            count: self.streak,
            last_active: self.last_active,
        }
    }
}

/// Logged or scheduled workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub workout_type: String,
    pub exercises: Vec<ExerciseRecord>,
    pub duration_minutes: i32,
    pub calories_burned: i32,
    pub scheduled_for: NaiveDate,
    pub completed_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Workout {
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}
