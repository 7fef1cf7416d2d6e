//! API request and response types

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::exercise::{normalize_exercises, ExerciseInput, ExerciseRecord};
use crate::metrics::{calculate_bmi, classify_bmi, ActivityLevel, FitnessLevel, Gender, ProfileInput};
use crate::plan::FitnessPlan;
use crate::validation::{self, check, ValidationError};

/// Days covered by a range query when no bounds are given
pub const DEFAULT_RANGE_DAYS: i64 = 7;
/// Longest range a single query may cover
pub const MAX_RANGE_DAYS: i64 = 366;
/// Furthest a query bound may lie from today, in either direction
pub const MAX_DATE_DISTANCE_DAYS: i64 = 36_600;

/// Optional date bounds for history queries
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateRangeQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRangeQuery {
    /// Fill missing bounds: `end` defaults to today, `start` to a week before `end`
    pub fn resolve(&self, today: NaiveDate) -> Result<(NaiveDate, NaiveDate), ValidationError> {
        let end = self.end.unwrap_or(today);
        check_window("end", end, today)?;

        let start = match self.start {
            Some(start) => start,
            None => end
                .checked_sub_signed(Duration::days(DEFAULT_RANGE_DAYS - 1))
                .ok_or_else(|| ValidationError::new("end", "end is out of range"))?,
        };
        check_window("start", start, today)?;

        if start > end {
            return Err(ValidationError::new("start", "start must not be after end"));
        }
        if (end - start).num_days() >= MAX_RANGE_DAYS {
            return Err(ValidationError::new(
                "start",
                &format!("range cannot exceed {} days", MAX_RANGE_DAYS),
            ));
        }
        Ok((start, end))
    }
}

fn check_window(field: &str, date: NaiveDate, today: NaiveDate) -> Result<(), ValidationError> {
    if date.signed_duration_since(today).num_days().abs() > MAX_DATE_DISTANCE_DAYS {
        return Err(ValidationError::new(
            field,
            &format!("{} must be within {} days of today", field, MAX_DATE_DISTANCE_DAYS),
        ));
    }
    Ok(())
}

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

// ============================================================================
// Auth Types
// ============================================================================

/// Authentication tokens response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    /// Optional initial profile
    #[serde(default)]
    pub profile: Option<UpdateProfileRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Account summary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub streak: i32,
    pub last_active: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Profile Types
// ============================================================================

/// Partial profile update; omitted fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub age: Option<i32>,
    pub gender: Option<String>,
    /// Centimetres
    pub height: Option<f64>,
    /// Kilograms
    pub weight: Option<f64>,
    pub fitness_level: Option<String>,
    pub goals: Option<String>,
    pub activity_level: Option<String>,
}

impl UpdateProfileRequest {
    pub fn is_empty(&self) -> bool {
        self.age.is_none()
            && self.gender.is_none()
            && self.height.is_none()
            && self.weight.is_none()
            && self.fitness_level.is_none()
            && self.goals.is_none()
            && self.activity_level.is_none()
    }

    /// Validate every provided field and convert to typed profile data
    pub fn validate(&self) -> Result<ProfileInput, ValidationError> {
        let age = self
            .age
            .map(|a| check("age", validation::validate_age(a)).map(|_| a))
            .transpose()?;
        let gender = self
            .gender
            .as_deref()
            .map(|g| check("gender", validation::validate_gender(g)))
            .transpose()?;
        let height_cm = self
            .height
            .map(|h| check("height_cm", validation::validate_height_cm(h)).map(|_| h))
            .transpose()?;
        let weight_kg = self
            .weight
            .map(|w| check("weight_kg", validation::validate_weight(w)).map(|_| w))
            .transpose()?;
        let fitness_level = self
            .fitness_level
            .as_deref()
            .map(|l| check("fitness_level", validation::validate_fitness_level(l)))
            .transpose()?;
        let activity_level = self
            .activity_level
            .as_deref()
            .map(|l| check("activity_level", validation::validate_activity_level(l)))
            .transpose()?;
        let goals = self
            .goals
            .as_deref()
            .map(|g| check("goals", validation::validate_goals(g)).map(|_| g.trim().to_string()))
            .transpose()?;

        Ok(ProfileInput {
            age,
            gender,
            height_cm,
            weight_kg,
            fitness_level,
            goals,
            activity_level,
        })
    }
}

/// BMI derived from the stored profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmiInfo {
    pub value: f64,
    pub category: String,
    pub description: String,
}

impl BmiInfo {
    pub fn from_measurements(weight_kg: f64, height_cm: f64) -> Self {
        let bmi = calculate_bmi(weight_kg, height_cm);
        let category = classify_bmi(bmi);
        Self {
            value: (bmi * 10.0).round() / 10.0,
            category: category.as_str().to_string(),
            description: category.description().to_string(),
        }
    }
}

/// Profile as returned to the client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub name: String,
    pub email: String,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub fitness_level: Option<FitnessLevel>,
    pub goals: Option<String>,
    pub activity_level: Option<ActivityLevel>,
    pub bmi: Option<BmiInfo>,
    pub streak: i32,
    pub last_active: DateTime<Utc>,
}

/// Result of a profile update: the new profile and the plan built from it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpdateResponse {
    pub profile: ProfileResponse,
    pub plan: FitnessPlan,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakResponse {
    pub streak: i32,
    pub last_active: DateTime<Utc>,
}

// ============================================================================
// Progress Types
// ============================================================================

pub const MAX_DAILY_STEPS: i32 = 200_000;
pub const MAX_DAILY_CALORIES: i32 = 50_000;
pub const MAX_DAILY_WATER_ML: i32 = 20_000;
pub const MAX_DAILY_WORKOUTS: i32 = 50;

/// Partial update of today's progress
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdateRequest {
    pub steps: Option<i32>,
    pub calories_consumed: Option<i32>,
    pub calories_burned: Option<i32>,
    pub water_intake: Option<i32>,
    pub workouts_completed: Option<i32>,
    pub weight: Option<f64>,
    pub heart_rate: Option<i32>,
    pub sleep_hours: Option<f64>,
}

impl ProgressUpdateRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let counters = [
            ("steps", self.steps, MAX_DAILY_STEPS, "Steps"),
            ("calories_consumed", self.calories_consumed, MAX_DAILY_CALORIES, "Calories consumed"),
            ("calories_burned", self.calories_burned, MAX_DAILY_CALORIES, "Calories burned"),
            ("water_intake", self.water_intake, MAX_DAILY_WATER_ML, "Water intake"),
            ("workouts_completed", self.workouts_completed, MAX_DAILY_WORKOUTS, "Workouts"),
        ];
        for (field, value, max, label) in counters {
            if let Some(v) = value {
                check(field, validation::validate_count(v, max, label))?;
            }
        }
        if let Some(w) = self.weight {
            check("weight", validation::validate_weight(w))?;
        }
        if let Some(bpm) = self.heart_rate {
            check("heart_rate", validation::validate_heart_rate(bpm))?;
        }
        if let Some(h) = self.sleep_hours {
            check("sleep_hours", validation::validate_sleep_hours(h))?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_none()
            && self.calories_consumed.is_none()
            && self.calories_burned.is_none()
            && self.water_intake.is_none()
            && self.workouts_completed.is_none()
            && self.weight.is_none()
            && self.heart_rate.is_none()
            && self.sleep_hours.is_none()
    }
}

// ============================================================================
// Workout Types
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkoutRequest {
    pub name: String,
    #[serde(default)]
    pub workout_type: Option<String>,
    #[serde(default)]
    pub exercises: Vec<ExerciseInput>,
    #[serde(default)]
    pub duration_minutes: Option<i32>,
    #[serde(default)]
    pub calories_burned: Option<i32>,
    #[serde(default)]
    pub scheduled_for: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Validated workout ready to persist
#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkout {
    pub name: String,
    pub workout_type: String,
    pub exercises: Vec<ExerciseRecord>,
    pub duration_minutes: i32,
    pub calories_burned: i32,
    pub scheduled_for: NaiveDate,
    pub notes: Option<String>,
}

impl CreateWorkoutRequest {
    pub fn validate(self, today: NaiveDate) -> Result<NewWorkout, ValidationError> {
        check("name", validation::validate_name(&self.name))?;
        let duration_minutes = self.duration_minutes.unwrap_or(0);
        check("duration_minutes", validation::validate_duration_minutes(duration_minutes))?;
        let calories_burned = self.calories_burned.unwrap_or(0);
        check(
            "calories_burned",
            validation::validate_count(calories_burned, MAX_DAILY_CALORIES, "Calories burned"),
        )?;

        Ok(NewWorkout {
            name: self.name.trim().to_string(),
            workout_type: self
                .workout_type
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "general".to_string()),
            exercises: normalize_exercises(self.exercises),
            duration_minutes,
            calories_burned,
            scheduled_for: self.scheduled_for.unwrap_or(today),
            notes: self.notes.filter(|n| !n.trim().is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    #[test]
    fn test_range_defaults_to_last_week() {
        let (start, end) = DateRangeQuery::default().resolve(day(10)).unwrap();
        assert_eq!((start, end), (day(4), day(10)));
    }

    #[test]
    fn test_range_rejects_extreme_dates() {
        let earliest = DateRangeQuery {
            start: None,
            end: Some(NaiveDate::MIN),
        };
        assert_eq!(earliest.resolve(day(10)).unwrap_err().field, "end");

        let latest = DateRangeQuery {
            start: Some(NaiveDate::MAX),
            end: Some(NaiveDate::MAX),
        };
        assert_eq!(latest.resolve(day(10)).unwrap_err().field, "end");

        let ancient_start = DateRangeQuery {
            start: Some(NaiveDate::MIN),
            end: None,
        };
        assert_eq!(ancient_start.resolve(day(10)).unwrap_err().field, "start");
    }

    #[test]
    fn test_range_from_query_string_with_extreme_end() {
        let query: DateRangeQuery =
            serde_json::from_value(json!({"end": NaiveDate::MIN})).unwrap();
        assert!(query.resolve(day(10)).is_err());
    }

    #[test]
    fn test_range_rejects_inverted_bounds() {
        let query = DateRangeQuery {
            start: Some(day(10)),
            end: Some(day(1)),
        };
        assert_eq!(query.resolve(day(10)).unwrap_err().field, "start");
    }

    #[test]
    fn test_profile_update_validation() {
        let ok: UpdateProfileRequest = serde_json::from_value(json!({
            "age": 30,
            "gender": "female",
            "height": 165.0,
            "fitnessLevel": "intermediate",
            "activityLevel": "very_active",
            "goals": "  run a marathon "
        }))
        .unwrap();
        let input = ok.validate().unwrap();
        assert_eq!(input.gender, Some(Gender::Female));
        assert_eq!(input.activity_level, Some(ActivityLevel::VeryActive));
        assert_eq!(input.weight_kg, None);
        assert_eq!(input.goals.as_deref(), Some("run a marathon"));

        let too_young = UpdateProfileRequest {
            age: Some(9),
            ..Default::default()
        };
        assert_eq!(too_young.validate().unwrap_err().field, "age");

        let bad_level = UpdateProfileRequest {
            activity_level: Some("hyper".into()),
            ..Default::default()
        };
        assert_eq!(bad_level.validate().unwrap_err().field, "activity_level");
    }

    #[test]
    fn test_progress_update_validation() {
        assert!(ProgressUpdateRequest::default().is_empty());
        let bad = ProgressUpdateRequest {
            steps: Some(-5),
            ..Default::default()
        };
        assert_eq!(bad.validate().unwrap_err().field, "steps");

        let ok = ProgressUpdateRequest {
            steps: Some(8000),
            sleep_hours: Some(7.5),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());
        assert!(!ok.is_empty());
    }

    #[test]
    fn test_workout_request_normalizes() {
        let req: CreateWorkoutRequest = serde_json::from_value(json!({
            "name": " Morning lift ",
            "workoutType": "Strength",
            "exercises": ["Deadlift", {"name": "Bench Press", "sets": 5, "reps": 5, "weight": 80}],
            "durationMinutes": 50
        }))
        .unwrap();
        let workout = req.validate(day(3)).unwrap();
        assert_eq!(workout.name, "Morning lift");
        assert_eq!(workout.workout_type, "strength");
        assert_eq!(workout.scheduled_for, day(3));
        assert_eq!(workout.exercises.len(), 2);
        assert_eq!(workout.exercises[1].weight_kg, Some(80.0));
    }

    #[test]
    fn test_bmi_info() {
        let bmi = BmiInfo::from_measurements(70.0, 175.0);
        assert_eq!(bmi.value, 22.9);
        assert_eq!(bmi.category, "normal");
    }
}
