//! Database repositories
//!
//! Thin data access layer. Every query is scoped by `user_id`.

pub mod plan;
pub mod progress;
pub mod user;
pub mod workout;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

pub use plan::PlanRepository;
pub use progress::ProgressRepository;
pub use user::{NewUser, UserRepository};
pub use workout::WorkoutRepository;

/// NUMERIC columns hold one decimal place
pub(crate) fn decimal_from_f64(value: f64) -> Option<Decimal> {
    Decimal::from_f64(value).map(|d| d.round_dp(1))
}

pub(crate) fn decimal_to_f64(value: Decimal) -> Option<f64> {
    value.to_f64()
}
