//! Notification Broadcaster
//!
//! Fan-out hub for server-pushed notifications. Subscribers are open
//! streaming connections, each backed by a bounded mpsc channel.
//! Delivery is best-effort: a full or closed channel never blocks
//! delivery to the other subscribers.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use shared::models::NotificationEvent;
use tokio::sync::mpsc;

/// Per-subscriber buffer. A subscriber that falls this far behind starts
/// losing events rather than applying backpressure to the sender.
const SUBSCRIBER_BUFFER: usize = 64;

/// One registered connection: who opened it and where its events go.
struct Subscriber {
    user: String,
    tx: mpsc::Sender<Arc<NotificationEvent>>,
}

/// Connected-subscriber registry
///
/// Cloneable handle; all clones share the same subscriber set.
#[derive(Clone, Default)]
pub struct NotificationHub {
    subscribers: Arc<DashMap<u64, Subscriber>>,
    next_id: Arc<AtomicU64>,
}

impl NotificationHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber for `user`. Returns its session id (pass
    /// to [`unregister`] on disconnect) and the receiving end of its
    /// channel.
    ///
    /// [`unregister`]: NotificationHub::unregister
    pub fn register(&self, user: &str) -> (u64, mpsc::Receiver<Arc<NotificationEvent>>) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::channel(SUBSCRIBER_BUFFER);
        self.subscribers.insert(
            id,
            Subscriber {
                user: user.to_string(),
                tx,
            },
        );
        tracing::debug!(
            subscriber = id,
            user,
            total = self.subscribers.len(),
            "Subscriber registered"
        );
        (id, rx)
    }

    pub fn unregister(&self, id: u64) {
        if self.subscribers.remove(&id).is_some() {
            tracing::debug!(subscriber = id, total = self.subscribers.len(), "Subscriber removed");
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Push an event to every connected subscriber, best-effort.
    ///
    /// A subscriber with a full buffer misses this event but stays
    /// registered; one whose receiver is gone is dropped from the set.
    pub fn broadcast(&self, event: NotificationEvent) {
        let event = Arc::new(event);
        let mut closed = Vec::new();

        for entry in self.subscribers.iter() {
            match entry.value().tx.try_send(Arc::clone(&event)) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    tracing::warn!(
                        subscriber = *entry.key(),
                        user = %entry.value().user,
                        kind = %event.kind,
                        "Subscriber buffer full, notification dropped"
                    );
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    closed.push(*entry.key());
                }
            }
        }

        // Removal happens outside the iteration; removing a shard entry
        // while holding its read guard would deadlock.
        for id in closed {
            self.unregister(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(message: &str) -> NotificationEvent {
        NotificationEvent::low_stock(message.to_string())
    }

    #[tokio::test]
    async fn broadcast_reaches_every_subscriber() {
        let hub = NotificationHub::new();
        let (_a, mut rx_a) = hub.register("alice");
        let (_b, mut rx_b) = hub.register("bob");

        hub.broadcast(event("Widget is low"));

        assert_eq!(rx_a.recv().await.unwrap().message, "Widget is low");
        assert_eq!(rx_b.recv().await.unwrap().message, "Widget is low");
    }

    #[tokio::test]
    async fn unregister_stops_delivery() {
        let hub = NotificationHub::new();
        let (id, mut rx) = hub.register("alice");

        hub.unregister(id);
        hub.broadcast(event("Widget is low"));

        assert!(rx.recv().await.is_none());
        assert_eq!(hub.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn dead_subscriber_does_not_block_the_rest() {
        let hub = NotificationHub::new();
        let (_dead, rx_dead) = hub.register("alice");
        let (_live, mut rx_live) = hub.register("bob");
        drop(rx_dead);

        hub.broadcast(event("Widget is low"));

        assert_eq!(rx_live.recv().await.unwrap().message, "Widget is low");
        // The closed subscriber was pruned during the broadcast.
        assert_eq!(hub.subscriber_count(), 1);
    }

    #[tokio::test]
    async fn full_buffer_drops_events_but_keeps_the_subscriber() {
        let hub = NotificationHub::new();
        let (_id, mut rx) = hub.register("alice");

        for i in 0..(SUBSCRIBER_BUFFER + 10) {
            hub.broadcast(event(&format!("event {i}")));
        }

        // The first BUFFER events made it; the overflow was dropped.
        for _ in 0..SUBSCRIBER_BUFFER {
            assert!(rx.try_recv().is_ok());
        }
        assert!(rx.try_recv().is_err());
        assert_eq!(hub.subscriber_count(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn registry_stays_consistent_under_concurrent_churn() {
        const EVENTS: usize = 32;

        let hub = NotificationHub::new();
        let mut steady = Vec::new();
        for _ in 0..4 {
            steady.push(hub.register("alice").1);
        }

        let mut tasks = tokio::task::JoinSet::new();
        let broadcaster = hub.clone();
        tasks.spawn(async move {
            for i in 0..EVENTS {
                broadcaster.broadcast(event(&format!("event {i}")));
                tokio::task::yield_now().await;
            }
        });
        // Connections coming and going while the broadcast loop runs.
        for _ in 0..16 {
            let hub = hub.clone();
            tasks.spawn(async move {
                let (id, rx) = hub.register("bob");
                tokio::task::yield_now().await;
                drop(rx);
                hub.unregister(id);
            });
        }
        while let Some(res) = tasks.join_next().await {
            res.unwrap();
        }

        // Subscribers present for the whole run missed nothing.
        for mut rx in steady {
            for i in 0..EVENTS {
                assert_eq!(rx.recv().await.unwrap().message, format!("event {i}"));
            }
        }
        // Every churn subscriber is gone again.
        assert_eq!(hub.subscriber_count(), 4);
    }
}
