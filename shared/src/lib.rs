//! Fitness Tracker Shared Library
//!
//! Domain logic and API types shared by the backend and its tests:
//! metric calculation, plan synthesis, streaks and daily progress.

pub mod errors;
pub mod exercise;
pub mod metrics;
pub mod models;
pub mod plan;
pub mod plan_parser;
pub mod progress;
pub mod streak;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use exercise::{ExerciseInput, ExerciseRecord};
pub use metrics::*;
pub use models::{User, Workout};
pub use plan::{DayOfWeek, DaySchedule, FitnessPlan, PlanSettings, PlanSource, WeeklySchedule};
pub use progress::{DailyProgress, ProgressSource, ProgressSummary};
pub use streak::{Streak, StreakTransition};
pub use types::*;
