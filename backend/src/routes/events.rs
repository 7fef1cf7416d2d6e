//! Server-sent events for the authenticated user
//!
//! Each connection subscribes to the in-process broadcast channel and only
//! forwards events addressed to the caller. Lagging subscribers lose events.

use crate::auth::AuthUser;
use crate::state::AppState;
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
    Router,
};
use std::convert::Infallible;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};
use tracing::{debug, warn};

pub fn event_routes() -> Router<AppState> {
    Router::new().route("/", get(stream_events))
}

/// GET /api/v1/events
async fn stream_events(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let user_id = auth.user_id;
    debug!(user_id = %user_id, "Event stream opened");

    let stream = BroadcastStream::new(state.events().subscribe()).filter_map(move |received| {
        let event = match received {
            Ok(event) if event.user_id == user_id => event,
            Ok(_) => return None,
            Err(e) => {
                debug!(user_id = %user_id, error = %e, "Event stream lagged");
                return None;
            }
        };

        match Event::default().event(event.kind.name()).json_data(&event) {
            Ok(sse) => Some(Ok(sse)),
            Err(e) => {
                warn!(error = %e, "Failed to encode event");
                None
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
