//! Fitness plan model and the static default plan
//!
//! A [`FitnessPlan`] always carries a seven-day [`WeeklySchedule`] ordered
//! Monday..Sunday. The type cannot be built or deserialized any other way.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::PlanError;
use crate::exercise::ExerciseRecord;
use crate::metrics::{calculate_daily_targets, DailyTargets, MacroPolicy, ResolvedProfile};

pub const DEFAULT_STEP_GOAL: i32 = 10_000;

// ============================================================================
// Weekdays
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }

    /// Case-insensitive lookup, accepting three-letter abbreviations
    pub fn parse_loose(value: &str) -> Option<Self> {
        let lower = value.trim().to_lowercase();
        DayOfWeek::ALL.into_iter().find(|d| {
            let name = d.as_str().to_lowercase();
            lower == name || (lower.len() == 3 && name.starts_with(&lower))
        })
    }

    pub fn from_chrono(day: chrono::Weekday) -> Self {
        DayOfWeek::ALL[day.num_days_from_monday() as usize]
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Schedule
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub day: DayOfWeek,
    pub title: String,
    pub duration_minutes: u32,
    pub calories_burn: u32,
    #[serde(default)]
    pub exercises: Vec<ExerciseRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<String>,
}

/// Exactly seven [`DaySchedule`]s, Monday first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<DaySchedule>", into = "Vec<DaySchedule>")]
pub struct WeeklySchedule(Vec<DaySchedule>);

impl WeeklySchedule {
    /// Build a schedule, rejecting anything that isn't Monday..Sunday in order
    pub fn new(days: Vec<DaySchedule>) -> Result<Self, PlanError> {
        if days.len() != 7 {
            return Err(PlanError::InvalidSchedule(format!(
                "expected 7 days, got {}",
                days.len()
            )));
        }
        for (entry, expected) in days.iter().zip(DayOfWeek::ALL) {
            if entry.day != expected {
                return Err(PlanError::InvalidSchedule(format!(
                    "expected {} but found {}",
                    expected, entry.day
                )));
            }
        }
        Ok(Self(days))
    }

    pub fn days(&self) -> &[DaySchedule] {
        &self.0
    }

    pub fn day(&self, day: DayOfWeek) -> &DaySchedule {
        // Index is valid because `new` checked position == weekday
        &self.0[day as usize]
    }
}

impl TryFrom<Vec<DaySchedule>> for WeeklySchedule {
    type Error = PlanError;

    fn try_from(days: Vec<DaySchedule>) -> Result<Self, Self::Error> {
        WeeklySchedule::new(days)
    }
}

impl From<WeeklySchedule> for Vec<DaySchedule> {
    fn from(schedule: WeeklySchedule) -> Self {
        schedule.0
    }
}

// ============================================================================
// Plan
// ============================================================================

/// Where a plan's schedule and advice came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanSource {
    Ai,
    Default,
}

impl PlanSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanSource::Ai => "ai",
            PlanSource::Default => "default",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitnessPlan {
    pub daily_calories: i32,
    pub protein_goal: i32,
    pub carbs_goal: i32,
    pub fat_goal: i32,
    /// Millilitres per day
    pub water_goal: i32,
    pub step_goal: i32,
    /// Sessions per week
    pub workout_goal: u32,
    pub weekly_schedule: WeeklySchedule,
    pub recommendations: Vec<String>,
    pub fitness_tips: Vec<String>,
    pub last_updated: DateTime<Utc>,
    pub source: PlanSource,
    pub macro_policy: MacroPolicy,
}

impl FitnessPlan {
    pub fn targets(&self) -> DailyTargets {
        DailyTargets {
            daily_calories: self.daily_calories,
            protein_goal: self.protein_goal,
            carbs_goal: self.carbs_goal,
            fat_goal: self.fat_goal,
            water_goal_ml: self.water_goal,
        }
    }
}

/// Settings that shape every generated plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanSettings {
    pub macro_policy: MacroPolicy,
    pub step_goal: i32,
}

impl Default for PlanSettings {
    fn default() -> Self {
        Self {
            macro_policy: MacroPolicy::default(),
            step_goal: DEFAULT_STEP_GOAL,
        }
    }
}

/// Static fallback plan: calculator goals with the fixed weekly template
pub fn build_default_plan(
    profile: &ResolvedProfile,
    settings: PlanSettings,
    now: DateTime<Utc>,
) -> FitnessPlan {
    let targets = calculate_daily_targets(profile, settings.macro_policy);

    FitnessPlan {
        daily_calories: targets.daily_calories,
        protein_goal: targets.protein_goal,
        carbs_goal: targets.carbs_goal,
        fat_goal: targets.fat_goal,
        water_goal: targets.water_goal_ml,
        step_goal: settings.step_goal,
        workout_goal: profile.fitness_level.weekly_workout_goal(),
        weekly_schedule: default_weekly_schedule(),
        recommendations: default_recommendations(),
        fitness_tips: default_fitness_tips(),
        last_updated: now,
        source: PlanSource::Default,
        macro_policy: settings.macro_policy,
    }
}

// ============================================================================
// Default Template
// ============================================================================

fn day(
    day: DayOfWeek,
    title: &str,
    duration_minutes: u32,
    calories_burn: u32,
    intensity: &str,
    exercises: Vec<ExerciseRecord>,
) -> DaySchedule {
    DaySchedule {
        day,
        title: title.to_string(),
        duration_minutes,
        calories_burn,
        exercises,
        intensity: Some(intensity.to_string()),
    }
}

pub fn default_weekly_schedule() -> WeeklySchedule {
    use DayOfWeek::*;

    WeeklySchedule(vec![
        day(
            Monday,
            "Upper Body Strength",
            45,
            300,
            "moderate",
            vec![
                ExerciseRecord::with_sets_reps("Push-ups", 3, 12),
                ExerciseRecord::with_sets_reps("Dumbbell Rows", 3, 10),
                ExerciseRecord::with_sets_reps("Shoulder Press", 3, 10),
                ExerciseRecord::with_sets_reps("Bicep Curls", 3, 12),
            ],
        ),
        day(
            Tuesday,
            "Cardio & Core",
            40,
            350,
            "moderate",
            vec![
                ExerciseRecord::timed("Brisk Run", 20),
                ExerciseRecord::with_sets_reps("Bicycle Crunches", 3, 20),
                ExerciseRecord::timed("Plank", 3),
            ],
        ),
        day(
            Wednesday,
            "Active Recovery",
            30,
            150,
            "low",
            vec![
                ExerciseRecord::timed("Walking", 20),
                ExerciseRecord::timed("Full Body Stretching", 10),
            ],
        ),
        day(
            Thursday,
            "Lower Body Strength",
            45,
            320,
            "moderate",
            vec![
                ExerciseRecord::with_sets_reps("Squats", 3, 12),
                ExerciseRecord::with_sets_reps("Lunges", 3, 10),
                ExerciseRecord::with_sets_reps("Glute Bridges", 3, 15),
                ExerciseRecord::with_sets_reps("Calf Raises", 3, 15),
            ],
        ),
        day(
            Friday,
            "HIIT Circuit",
            30,
            400,
            "high",
            vec![
                ExerciseRecord::with_sets_reps("Burpees", 4, 10),
                ExerciseRecord::with_sets_reps("Jump Squats", 4, 12),
                ExerciseRecord::with_sets_reps("Mountain Climbers", 4, 20),
            ],
        ),
        day(
            Saturday,
            "Cardio Endurance",
            50,
            450,
            "moderate",
            vec![
                ExerciseRecord::timed("Cycling", 35),
                ExerciseRecord::timed("Jump Rope", 15),
            ],
        ),
        day(Sunday, "Rest Day", 0, 0, "rest", Vec::new()),
    ])
}

pub fn default_recommendations() -> Vec<String> {
    [
        "Aim for 7-9 hours of sleep each night to support recovery",
        "Spread protein intake evenly across your meals",
        "Drink water consistently throughout the day",
        "Increase training load gradually, about 10% per week",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

pub fn default_fitness_tips() -> Vec<String> {
    [
        "Warm up for 5-10 minutes before every workout",
        "Focus on form before adding weight",
        "Track your progress to stay motivated",
        "Take rest days seriously, muscles grow during recovery",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
