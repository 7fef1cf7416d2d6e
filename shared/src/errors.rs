//! Error types for the Fitness Tracker application

use thiserror::Error;

/// Plan generation failures
///
/// These never reach API callers; the synthesizer falls back to the default
/// plan and logs the reason.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error("AI generation disabled")]
    Disabled,

    #[error("AI request failed: {0}")]
    Upstream(String),

    #[error("AI request timed out after {0}s")]
    Timeout(u64),

    #[error("no JSON object found in AI response")]
    NoJson,

    #[error("malformed plan JSON: {0}")]
    Malformed(String),

    #[error("invalid weekly schedule: {0}")]
    InvalidSchedule(String),
}

impl PlanError {
    /// Short label used for log fields and metric tags
    pub fn reason(&self) -> &'static str {
        match self {
            PlanError::Disabled => "disabled",
            PlanError::Upstream(_) => "upstream",
            PlanError::Timeout(_) => "timeout",
            PlanError::NoJson => "no_json",
            PlanError::Malformed(_) => "malformed",
            PlanError::InvalidSchedule(_) => "invalid_schedule",
        }
    }
}

/// Authentication error types
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Missing token")]
    MissingToken,
}
