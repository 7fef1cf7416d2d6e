//! Per-user real-time events
//!
//! Events go to an in-process broadcast channel (feeding the SSE endpoint)
//! and, when Redis is connected, to `PUBLISH fitness:events:{user_id}`.
//! Delivery is at-most-once; publishing never fails the caller.

use chrono::{DateTime, NaiveDate, Utc};
use fitness_tracker_shared::{PlanSource, StreakTransition};
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{trace, warn};
use uuid::Uuid;

const CHANNEL_CAPACITY: usize = 256;

/// Event payload, tagged with `type` on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    PlanUpdated {
        source: PlanSource,
        last_updated: DateTime<Utc>,
    },
    StreakChanged {
        streak: i32,
        transition: StreakTransition,
    },
    WorkoutCompleted {
        workout_id: Uuid,
        calories_burned: i32,
    },
    ProgressUpdated {
        date: NaiveDate,
    },
}

impl EventKind {
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::PlanUpdated { .. } => "plan_updated",
            EventKind::StreakChanged { .. } => "streak_changed",
            EventKind::WorkoutCompleted { .. } => "workout_completed",
            EventKind::ProgressUpdated { .. } => "progress_updated",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserEvent {
    pub user_id: Uuid,
    pub at: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: EventKind,
}

pub fn redis_channel(user_id: Uuid) -> String {
    format!("fitness:events:{}", user_id)
}

#[derive(Clone)]
pub struct EventPublisher {
    sender: broadcast::Sender<UserEvent>,
    redis: Option<ConnectionManager>,
}

impl EventPublisher {
    pub fn new(redis: Option<ConnectionManager>) -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender, redis }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<UserEvent> {
        self.sender.subscribe()
    }

    /// Fire-and-forget delivery of one event
    pub fn publish(&self, user_id: Uuid, kind: EventKind) {
        let event = UserEvent {
            user_id,
            at: Utc::now(),
            kind,
        };

        metrics::counter!("events_published_total", "type" => event.kind.name()).increment(1);

        if let Some(conn) = &self.redis {
            match serde_json::to_string(&event) {
                Ok(payload) => {
                    let mut conn = conn.clone();
                    let channel = redis_channel(user_id);
                    tokio::spawn(async move {
                        let result: redis::RedisResult<i64> = conn.publish(&channel, payload).await;
                        if let Err(e) = result {
                            warn!(channel = %channel, error = %e, "Redis publish failed");
                        }
                    });
                }
                Err(e) => warn!(error = %e, "Failed to serialize event"),
            }
        }

        // No receivers is the normal case when nobody is listening
        if self.sender.send(event).is_err() {
            trace!(user_id = %user_id, "No event subscribers");
        }
    }
}
