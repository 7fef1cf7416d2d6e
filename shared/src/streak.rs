//! Consecutive-day activity streaks
//!
//! Days are UTC calendar days. An activity on the same day holds the streak,
//! the next day increments it, and any longer gap resets it to 1.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Streak {
    pub count: i32,
    pub last_active: DateTime<Utc>,
}

/// What an activity event did to the streak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakTransition {
    /// First activity on an empty streak
    Started,
    Held,
    Incremented,
    Reset,
}

impl StreakTransition {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreakTransition::Started => "started",
            StreakTransition::Held => "held",
            StreakTransition::Incremented => "incremented",
            StreakTransition::Reset => "reset",
        }
    }
}

/// Whole calendar days from `earlier` to `later`, negative if `later` is before
pub fn days_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> i64 {
    (later.date_naive() - earlier.date_naive()).num_days()
}

impl Streak {
    pub fn new(created_at: DateTime<Utc>) -> Self {
        Self {
            count: 0,
            last_active: created_at,
        }
    }

    /// Apply an activity at `now`. `last_active` always moves to `now`.
    pub fn record_activity(self, now: DateTime<Utc>) -> (Streak, StreakTransition) {
        let (count, transition) = if self.count <= 0 {
            (1, StreakTransition::Started)
        } else {
            match days_between(self.last_active, now) {
                1 => (self.count + 1, StreakTransition::Incremented),
                d if d > 1 => (1, StreakTransition::Reset),
                // Same day, or a clock that moved backwards
                _ => (self.count, StreakTransition::Held),
            }
        };

        (
            Streak {
                count,
                last_active: now,
            },
            transition,
        )
    }
}
