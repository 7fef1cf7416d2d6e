//! Exercise entries
//!
//! Clients send exercises either as a bare name (`"Push-ups"`) or as a
//! detailed object. Both are normalized into [`ExerciseRecord`] at the
//! boundary so nothing downstream branches on the shape.

use serde::{Deserialize, Serialize};

/// Canonical exercise shape stored on plans and workouts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ExerciseRecord {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_sets_reps(name: impl Into<String>, sets: u32, reps: u32) -> Self {
        Self {
            name: name.into(),
            sets: Some(sets),
            reps: Some(reps),
            ..Default::default()
        }
    }

    pub fn timed(name: impl Into<String>, minutes: u32) -> Self {
        Self {
            name: name.into(),
            duration_minutes: Some(minutes),
            ..Default::default()
        }
    }
}

/// Exercise as received on the wire
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ExerciseInput {
    Name(String),
    Detailed(DetailedExercise),
}

/// Object form of an exercise. Accepts `name`, `exercise` or `title` as the label
/// and `duration`/`durationMinutes` interchangeably.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedExercise {
    #[serde(alias = "exercise", alias = "title")]
    pub name: String,
    #[serde(default)]
    pub sets: Option<u32>,
    #[serde(default)]
    pub reps: Option<u32>,
    #[serde(default, alias = "duration", alias = "duration_minutes")]
    pub duration_minutes: Option<u32>,
    #[serde(default, alias = "weight", alias = "weight_kg")]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<ExerciseInput> for ExerciseRecord {
    fn from(input: ExerciseInput) -> Self {
        match input {
            ExerciseInput::Name(name) => ExerciseRecord::named(name.trim()),
            ExerciseInput::Detailed(d) => ExerciseRecord {
                name: d.name.trim().to_string(),
                sets: d.sets,
                reps: d.reps,
                duration_minutes: d.duration_minutes,
                weight_kg: d.weight_kg.filter(|w| w.is_finite() && *w >= 0.0),
                notes: d.notes.filter(|n| !n.trim().is_empty()),
            },
        }
    }
}

/// Normalize a list of wire exercises, dropping entries without a name
pub fn normalize_exercises(inputs: Vec<ExerciseInput>) -> Vec<ExerciseRecord> {
    inputs
        .into_iter()
        .map(ExerciseRecord::from)
        .filter(|e| !e.name.is_empty())
        .collect()
}
