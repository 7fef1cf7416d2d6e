//! Route definitions for the Fitness Tracker API
//!
//! Everything except health probes and metrics lives under `/api/v1`.

use crate::state::AppState;
use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod auth;
mod events;
mod health;
mod metrics;
mod plan;
mod profile;
mod progress;
mod streak;
mod workouts;


pub use auth::auth_routes;
pub use events::event_routes;
pub use plan::plan_routes;
pub use profile::profile_routes;
pub use progress::progress_routes;
pub use streak::streak_routes;
pub use workouts::workout_routes;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .route("/metrics", get(metrics::render))
        .nest("/api/v1", api_routes())
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API v1 routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { "Fitness Tracker API v1" }))
        .nest("/auth", auth::auth_routes())
        .nest("/profile", profile::profile_routes())
        .nest("/plan", plan::plan_routes())
        .nest("/streak", streak::streak_routes())
        .nest("/progress", progress::progress_routes())
        .nest("/workouts", workouts::workout_routes())
        .nest("/events", events::event_routes())
}
