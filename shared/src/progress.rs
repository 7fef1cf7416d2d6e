//! Daily progress snapshots
//!
//! One record per user per UTC calendar day. When nothing is tracked for
//! today a bounded placeholder is synthesized instead.

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Whether a snapshot was logged by the user or synthesized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressSource {
    Tracked,
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyProgress {
    pub date: NaiveDate,
    pub steps: i32,
    pub calories_consumed: i32,
    pub calories_burned: i32,
    /// Millilitres
    pub water_intake: i32,
    pub workouts_completed: i32,
    pub weight: Option<f64>,
    pub heart_rate: Option<i32>,
    pub sleep_hours: Option<f64>,
    pub source: ProgressSource,
}

impl DailyProgress {
    /// A record is stale once its date is no longer today
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        self.date != now.date_naive()
    }
}

// ============================================================================
// Placeholder Generation
// ============================================================================

pub const ACTIVE_HOURS_START: u32 = 8;
pub const ACTIVE_HOURS_END: u32 = 20;
const ACTIVE_MULTIPLIER: f64 = 1.0;
const INACTIVE_MULTIPLIER: f64 = 0.6;

pub const MAX_PLACEHOLDER_STEPS: i32 = 12_000;
pub const MAX_PLACEHOLDER_CALORIES_CONSUMED: i32 = 2_600;
pub const MAX_PLACEHOLDER_CALORIES_BURNED: i32 = 600;
pub const MAX_PLACEHOLDER_WATER_ML: i32 = 3_000;

pub fn is_active_hour(hour: u32) -> bool {
    (ACTIVE_HOURS_START..ACTIVE_HOURS_END).contains(&hour)
}

/// Fraction of the UTC day elapsed at `now`, in `[0, 1)`
pub fn day_fraction(now: DateTime<Utc>) -> f64 {
    now.num_seconds_from_midnight() as f64 / 86_400.0
}

/// Share of the day's activity accrued by `now`, in `[0, 1]`
///
/// Time inside active hours accrues at the full rate, the rest at a damped
/// rate, so the value only grows through the day.
pub fn activity_fraction(now: DateTime<Utc>) -> f64 {
    let elapsed = now.num_seconds_from_midnight() as f64;
    let active_start = (ACTIVE_HOURS_START * 3_600) as f64;
    let active_end = (ACTIVE_HOURS_END * 3_600) as f64;

    let active_elapsed = (elapsed.min(active_end) - active_start).max(0.0);
    let inactive_elapsed = elapsed - active_elapsed;
    let active_span = active_end - active_start;
    let full_day = active_span * ACTIVE_MULTIPLIER + (86_400.0 - active_span) * INACTIVE_MULTIPLIER;

    (active_elapsed * ACTIVE_MULTIPLIER + inactive_elapsed * INACTIVE_MULTIPLIER) / full_day
}

/// Synthesize a plausible snapshot for today
///
/// Cumulative values scale with the elapsed part of the day, with activity
/// driven totals accruing more slowly outside active hours. Nothing here is
/// persisted.
pub fn placeholder_progress<R: Rng + ?Sized>(
    rng: &mut R,
    now: DateTime<Utc>,
    weight_kg: Option<f64>,
) -> DailyProgress {
    let fraction = day_fraction(now);
    let accrued = activity_fraction(now);
    let active = is_active_hour(now.hour());

    let steps = rng.gen_range(6_000.0..MAX_PLACEHOLDER_STEPS as f64) * accrued;
    let consumed = rng.gen_range(1_800.0..MAX_PLACEHOLDER_CALORIES_CONSUMED as f64) * fraction;
    let burned = rng.gen_range(200.0..MAX_PLACEHOLDER_CALORIES_BURNED as f64) * accrued;
    let water = rng.gen_range(1_500.0..MAX_PLACEHOLDER_WATER_ML as f64) * fraction;

    let workouts_completed = if now.hour() >= 18 && rng.gen_bool(0.5) { 1 } else { 0 };

    let resting = rng.gen_range(60..=80);
    let heart_rate = if active {
        resting + rng.gen_range(0..=20)
    } else {
        resting
    };

    let sleep_hours = (rng.gen_range(6.0..9.0_f64) * 10.0).round() / 10.0;

    DailyProgress {
        date: now.date_naive(),
        steps: steps.round() as i32,
        calories_consumed: consumed.round() as i32,
        calories_burned: burned.round() as i32,
        water_intake: water.round() as i32,
        workouts_completed,
        weight: weight_kg,
        heart_rate: Some(heart_rate),
        sleep_hours: Some(sleep_hours),
        source: ProgressSource::Placeholder,
    }
}

// ============================================================================
// Summary
// ============================================================================

/// Totals and per-day averages over a date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days_tracked: i32,
    pub total_steps: i64,
    pub total_calories_consumed: i64,
    pub total_calories_burned: i64,
    pub total_water_intake: i64,
    pub total_workouts: i64,
    pub average_steps: f64,
    pub average_calories_consumed: f64,
    pub average_calories_burned: f64,
    pub average_water_intake: f64,
    pub average_sleep_hours: Option<f64>,
    pub latest_weight: Option<f64>,
}

/// Aggregate tracked records; averages are per tracked day
pub fn summarize(start: NaiveDate, end: NaiveDate, records: &[DailyProgress]) -> ProgressSummary {
    let in_range: Vec<&DailyProgress> = records
        .iter()
        .filter(|r| r.date >= start && r.date <= end)
        .collect();
    let days = in_range.len() as i32;

    let total = |f: fn(&DailyProgress) -> i32| in_range.iter().map(|r| f(*r) as i64).sum::<i64>();
    let average = |sum: i64| if days == 0 { 0.0 } else { sum as f64 / days as f64 };

    let total_steps = total(|r| r.steps);
    let total_calories_consumed = total(|r| r.calories_consumed);
    let total_calories_burned = total(|r| r.calories_burned);
    let total_water_intake = total(|r| r.water_intake);
    let total_workouts = total(|r| r.workouts_completed);

    let sleep: Vec<f64> = in_range.iter().filter_map(|r| r.sleep_hours).collect();
    let average_sleep_hours = if sleep.is_empty() {
        None
    } else {
        Some(sleep.iter().sum::<f64>() / sleep.len() as f64)
    };

    let latest_weight = in_range
        .iter()
        .filter(|r| r.weight.is_some())
        .max_by_key(|r| r.date)
        .and_then(|r| r.weight);

    ProgressSummary {
        start,
        end,
        days_tracked: days,
        total_steps,
        total_calories_consumed,
        total_calories_burned,
        total_water_intake,
        total_workouts,
        average_steps: average(total_steps),
        average_calories_consumed: average(total_calories_consumed),
        average_calories_burned: average(total_calories_burned),
        average_water_intake: average(total_water_intake),
        average_sleep_hours,
        latest_weight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tracked(date: NaiveDate, steps: i32, weight: Option<f64>) -> DailyProgress {
        DailyProgress {
            date,
            steps,
            calories_consumed: 2000,
            calories_burned: 300,
            water_intake: 2000,
            workouts_completed: 1,
            weight,
            heart_rate: None,
            sleep_hours: Some(7.0),
            source: ProgressSource::Tracked,
        }
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    #[test]
    fn test_placeholder_at_midnight_is_empty() {
        let mut rng = StdRng::seed_from_u64(7);
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let p = placeholder_progress(&mut rng, now, Some(70.0));
        assert_eq!(p.steps, 0);
        assert_eq!(p.calories_consumed, 0);
        assert_eq!(p.water_intake, 0);
        assert_eq!(p.workouts_completed, 0);
        assert_eq!(p.weight, Some(70.0));
        assert_eq!(p.source, ProgressSource::Placeholder);
        assert!(!p.is_stale(now));
    }

    #[test]
    fn test_steps_keep_rising_past_active_hours() {
        let before = Utc.with_ymd_and_hms(2024, 6, 1, 19, 59, 59).unwrap();
        let after = Utc.with_ymd_and_hms(2024, 6, 1, 20, 0, 0).unwrap();
        for seed in 0..20 {
            let a = placeholder_progress(&mut StdRng::seed_from_u64(seed), before, None);
            let b = placeholder_progress(&mut StdRng::seed_from_u64(seed), after, None);
            assert!(b.steps >= a.steps, "seed {seed}: {} -> {}", a.steps, b.steps);
            assert!(b.calories_burned >= a.calories_burned);
        }
    }

    #[test]
    fn test_activity_fraction_shape() {
        let at = |h, m| activity_fraction(Utc.with_ymd_and_hms(2024, 6, 1, h, m, 0).unwrap());
        assert_eq!(at(0, 0), 0.0);
        // Eight damped hours, then twelve at full rate
        assert!((at(8, 0) - 8.0 * 0.6 / 19.2).abs() < 1e-9);
        assert!((at(20, 0) - (4.8 + 12.0) / 19.2).abs() < 1e-9);
        assert!(at(23, 59) < 1.0);
        assert!(at(12, 0) - at(11, 0) > at(22, 0) - at(21, 0));
    }

    #[test]
    fn test_stale_detection() {
        let record = tracked(date(1), 100, None);
        let same_day = Utc.with_ymd_and_hms(2024, 6, 1, 23, 0, 0).unwrap();
        let next_day = Utc.with_ymd_and_hms(2024, 6, 2, 0, 0, 1).unwrap();
        assert!(!record.is_stale(same_day));
        assert!(record.is_stale(next_day));
    }

    #[test]
    fn test_active_hours() {
        assert!(!is_active_hour(7));
        assert!(is_active_hour(8));
        assert!(is_active_hour(19));
        assert!(!is_active_hour(20));
    }

    #[test]
    fn test_summarize() {
        let records = vec![
            tracked(date(1), 4000, Some(71.0)),
            tracked(date(2), 6000, None),
            tracked(date(3), 8000, Some(70.5)),
            tracked(date(9), 99999, Some(60.0)),
        ];
        let summary = summarize(date(1), date(7), &records);
        assert_eq!(summary.days_tracked, 3);
        assert_eq!(summary.total_steps, 18000);
        assert_eq!(summary.average_steps, 6000.0);
        assert_eq!(summary.total_workouts, 3);
        assert_eq!(summary.average_sleep_hours, Some(7.0));
        assert_eq!(summary.latest_weight, Some(70.5));
    }

    #[test]
    fn test_summarize_empty_range() {
        let summary = summarize(date(1), date(7), &[]);
        assert_eq!(summary.days_tracked, 0);
        assert_eq!(summary.average_steps, 0.0);
        assert_eq!(summary.average_sleep_hours, None);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: placeholder values stay within their bounds
        #[test]
        fn prop_placeholder_bounded(seed in any::<u64>(), secs in 0u32..86_400) {
            let mut rng = StdRng::seed_from_u64(seed);
            let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
                + chrono::Duration::seconds(secs as i64);
            let p = placeholder_progress(&mut rng, now, None);

            prop_assert!((0..=MAX_PLACEHOLDER_STEPS).contains(&p.steps));
            prop_assert!((0..=MAX_PLACEHOLDER_CALORIES_CONSUMED).contains(&p.calories_consumed));
            prop_assert!((0..=MAX_PLACEHOLDER_CALORIES_BURNED).contains(&p.calories_burned));
            prop_assert!((0..=MAX_PLACEHOLDER_WATER_ML).contains(&p.water_intake));
            prop_assert!((0..=1).contains(&p.workouts_completed));
            prop_assert!(matches!(p.heart_rate, Some(60..=100)));
            prop_assert!(matches!(p.sleep_hours, Some(h) if (6.0..=9.0).contains(&h)));
            prop_assert_eq!(p.date, now.date_naive());
        }

        /// Property: later in the day never means smaller totals for the same draw
        #[test]
        fn prop_placeholder_totals_never_drop(
            seed in any::<u64>(),
            secs in 0i64..86_399,
            step in 1i64..86_400
        ) {
            let midnight = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
            let earlier = midnight + chrono::Duration::seconds(secs);
            let later = midnight + chrono::Duration::seconds((secs + step).min(86_399));
            let a = placeholder_progress(&mut StdRng::seed_from_u64(seed), earlier, None);
            let b = placeholder_progress(&mut StdRng::seed_from_u64(seed), later, None);
            prop_assert!(b.steps >= a.steps);
            prop_assert!(b.calories_consumed >= a.calories_consumed);
            prop_assert!(b.calories_burned >= a.calories_burned);
            prop_assert!(b.water_intake >= a.water_intake);
            prop_assert!(b.workouts_completed >= a.workouts_completed);
        }
    }
}
