//! Notification API Handlers
//!
//! Server-sent events endpoint. Each connection registers one hub
//! subscriber; the registration is dropped together with the stream when
//! the client disconnects.

use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;
use shared::models::NotificationEvent;
use std::sync::Arc;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::notify::NotificationHub;

/// Unregisters the subscriber when the SSE stream is dropped.
struct SubscriberGuard {
    hub: NotificationHub,
    id: u64,
}

impl Drop for SubscriberGuard {
    fn drop(&mut self) {
        self.hub.unregister(self.id);
        tracing::debug!(subscriber = self.id, "Notification stream closed");
    }
}

/// GET /api/notifications/stream - subscribe to low-stock notifications
pub async fn stream(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (id, rx) = state.hub().register(&user.username);
    tracing::info!(subscriber = id, user = %user.username, "Notification stream opened");

    let guard = SubscriberGuard {
        hub: state.hub().clone(),
        id,
    };

    let stream = futures::stream::unfold((rx, guard), |(mut rx, guard)| async move {
        let event = rx.recv().await?;
        Some((Ok::<_, Infallible>(to_sse_event(&event)), (rx, guard)))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

fn to_sse_event(event: &Arc<NotificationEvent>) -> Event {
    match Event::default().event("notification").json_data(&**event) {
        Ok(sse) => sse,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize notification event");
            Event::default().comment("serialization failure")
        }
    }
}
