//! Business logic services
//!
//! Services coordinate repositories, the plan synthesizer and the event
//! publisher. Handlers stay thin and call into these.

pub mod ai;
pub mod events;
pub mod plan;
pub mod profile;
pub mod progress;
pub mod streak;
pub mod user;
pub mod workout;

pub use ai::{AiError, OllamaClient, TextGenerator};
pub use events::{EventKind, EventPublisher, UserEvent};
pub use plan::{PlanService, PlanSynthesizer};
pub use profile::ProfileService;
pub use progress::ProgressService;
pub use streak::StreakService;
pub use user::UserService;
pub use workout::WorkoutService;
