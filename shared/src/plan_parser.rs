//! Prompt construction and parsing of AI-generated plans
//!
//! Model output is free text that usually, but not always, contains a JSON
//! object. The first balanced object is extracted and validated; anything
//! that doesn't yield a Monday..Sunday schedule is rejected with a
//! [`PlanError`] so the caller can fall back.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::errors::PlanError;
use crate::exercise::{normalize_exercises, ExerciseInput};
use crate::metrics::{calculate_daily_targets, DailyTargets, ResolvedProfile};
use crate::plan::{
    default_fitness_tips, default_recommendations, DayOfWeek, DaySchedule, FitnessPlan, PlanSettings,
    PlanSource, WeeklySchedule,
};

/// Build the instruction sent to the text generator
pub fn build_prompt(profile: &ResolvedProfile, targets: &DailyTargets) -> String {
    format!(
        r#"You are a certified personal trainer. Create a weekly fitness plan for this person.

Profile:
- Age: {age}
- Gender: {gender}
- Height: {height} cm
- Weight: {weight} kg
- Fitness level: {fitness}
- Activity level: {activity}
- Goals: {goals}

Daily targets (already computed, do not change them):
- Calories: {calories} kcal
- Protein: {protein} g
- Carbs: {carbs} g
- Fat: {fat} g
- Water: {water} ml

Respond with ONLY a JSON object of this shape:
{{
  "weeklySchedule": [
    {{"day": "Monday", "title": "...", "durationMinutes": 45, "caloriesBurn": 300, "intensity": "moderate",
      "exercises": [{{"name": "...", "sets": 3, "reps": 12}}]}}
  ],
  "recommendations": ["..."],
  "fitnessTips": ["..."]
}}
The weeklySchedule must contain exactly seven entries, Monday through Sunday in order."#,
        age = profile.age_years,
        gender = profile.gender,
        height = profile.height_cm,
        weight = profile.weight_kg,
        fitness = profile.fitness_level,
        activity = profile.activity_level,
        goals = profile.goals,
        calories = targets.daily_calories,
        protein = targets.protein_goal,
        carbs = targets.carbs_goal,
        fat = targets.fat_goal,
        water = targets.water_goal_ml,
    )
}

/// Find the first balanced `{...}` in `text`
///
/// Braces inside JSON strings (including escaped quotes) are ignored.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

// ============================================================================
// AI Draft
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AiPlanDraft {
    #[serde(alias = "weekly_schedule", alias = "schedule")]
    weekly_schedule: AiSchedule,
    #[serde(default)]
    recommendations: Vec<String>,
    #[serde(default, alias = "fitness_tips", alias = "tips")]
    fitness_tips: Vec<String>,
}

/// Models return the schedule either as a list or keyed by weekday
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AiSchedule {
    List(Vec<AiDay>),
    Keyed(HashMap<String, AiDay>),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AiDay {
    #[serde(default)]
    day: Option<String>,
    #[serde(default, alias = "focus", alias = "name", alias = "workout")]
    title: Option<String>,
    #[serde(default, alias = "duration", alias = "duration_minutes")]
    duration_minutes: Option<f64>,
    #[serde(default, alias = "calories", alias = "calories_burn", alias = "caloriesBurned")]
    calories_burn: Option<f64>,
    #[serde(default)]
    exercises: Vec<ExerciseInput>,
    #[serde(default)]
    intensity: Option<String>,
}

impl AiDay {
    fn into_schedule(self, day: DayOfWeek) -> Result<DaySchedule, PlanError> {
        let title = self
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| PlanError::Malformed(format!("{} has no title", day)))?;

        Ok(DaySchedule {
            day,
            title,
            duration_minutes: non_negative(self.duration_minutes),
            calories_burn: non_negative(self.calories_burn),
            exercises: normalize_exercises(self.exercises),
            intensity: self.intensity.filter(|i| !i.trim().is_empty()),
        })
    }
}

fn non_negative(value: Option<f64>) -> u32 {
    value
        .filter(|v| v.is_finite() && *v > 0.0)
        .map(|v| v.round() as u32)
        .unwrap_or(0)
}

fn parse_day(label: &str) -> Result<DayOfWeek, PlanError> {
    DayOfWeek::parse_loose(label)
        .ok_or_else(|| PlanError::InvalidSchedule(format!("unknown day '{}'", label)))
}

impl AiSchedule {
    fn into_weekly(self) -> Result<WeeklySchedule, PlanError> {
        let days = match self {
            AiSchedule::List(entries) => entries
                .into_iter()
                .enumerate()
                .map(|(i, entry)| {
                    let day = match entry.day.as_deref() {
                        Some(label) => parse_day(label)?,
                        None => *DayOfWeek::ALL.get(i).ok_or_else(|| {
                            PlanError::InvalidSchedule("more than 7 days".to_string())
                        })?,
                    };
                    entry.into_schedule(day)
                })
                .collect::<Result<Vec<_>, _>>()?,
            AiSchedule::Keyed(map) => {
                let mut by_day: HashMap<DayOfWeek, AiDay> = HashMap::new();
                for (label, entry) in map {
                    by_day.insert(parse_day(&label)?, entry);
                }
                DayOfWeek::ALL
                    .into_iter()
                    .map(|day| {
                        by_day
                            .remove(&day)
                            .ok_or_else(|| PlanError::InvalidSchedule(format!("missing {}", day)))
                            .and_then(|entry| entry.into_schedule(day))
                    })
                    .collect::<Result<Vec<_>, _>>()?
            }
        };

        WeeklySchedule::new(days)
    }
}

fn non_empty(items: Vec<String>, fallback: fn() -> Vec<String>) -> Vec<String> {
    let cleaned: Vec<String> = items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if cleaned.is_empty() {
        fallback()
    } else {
        cleaned
    }
}

/// Turn raw model output into a plan
///
/// Numeric goals always come from the calculator. The model contributes the
/// schedule and advice lists; empty lists are replaced with the defaults.
pub fn parse_ai_plan(
    text: &str,
    profile: &ResolvedProfile,
    settings: PlanSettings,
    now: DateTime<Utc>,
) -> Result<FitnessPlan, PlanError> {
    let json = extract_json_object(text).ok_or(PlanError::NoJson)?;
    let draft: AiPlanDraft =
        serde_json::from_str(json).map_err(|e| PlanError::Malformed(e.to_string()))?;

    let weekly_schedule = draft.weekly_schedule.into_weekly()?;
    let targets = calculate_daily_targets(profile, settings.macro_policy);

    Ok(FitnessPlan {
        daily_calories: targets.daily_calories,
        protein_goal: targets.protein_goal,
        carbs_goal: targets.carbs_goal,
        fat_goal: targets.fat_goal,
        water_goal: targets.water_goal_ml,
        step_goal: settings.step_goal,
        workout_goal: profile.fitness_level.weekly_workout_goal(),
        weekly_schedule,
        recommendations: non_empty(draft.recommendations, default_recommendations),
        fitness_tips: non_empty(draft.fitness_tips, default_fitness_tips),
        last_updated: now,
        source: PlanSource::Ai,
        macro_policy: settings.macro_policy,
    })
}
