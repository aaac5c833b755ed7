//! Alert Deduplicator
//!
//! Suppresses repeat low-stock broadcasts. Per product the state machine
//! is Silent -> Alerted (on first alert) -> Silent (when the suppression
//! window elapses). While Alerted, further alerts for the same product
//! are swallowed.
//!
//! Every call schedules its own removal of the product from the alerted
//! set, window-measured from that call. Timers are not coalesced: with
//! overlapping calls the earliest expiry clears the state, matching a
//! window measured from the first alert. State is in-memory and
//! process-local; a restart clears all suppression.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashSet;
use shared::models::NotificationEvent;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;

use crate::db::models::LowStockProduct;
use crate::db::repository::ProductRepository;
use crate::notify::NotificationHub;

/// Deduplicating front-end to the notification hub.
///
/// Cloneable handle; clones share the alerted set.
#[derive(Clone)]
pub struct AlertDeduplicator {
    hub: NotificationHub,
    alerted: Arc<DashSet<String>>,
    window: Duration,
}

impl AlertDeduplicator {
    pub fn new(hub: NotificationHub, window: Duration) -> Self {
        Self {
            hub,
            alerted: Arc::new(DashSet::new()),
            window,
        }
    }

    /// Broadcast `message` for `product_key` unless that product is
    /// already in its suppression window. Returns whether a broadcast
    /// happened.
    pub fn send_deduplicated_alert(&self, product_key: &str, message: String) -> bool {
        let fresh = self.alerted.insert(product_key.to_string());

        if fresh {
            tracing::info!(product = %product_key, "Low-stock alert broadcast");
            self.hub.broadcast(NotificationEvent::low_stock(message));
        } else {
            tracing::debug!(product = %product_key, "Low-stock alert suppressed");
        }

        // Each call schedules its own expiry; the earliest one wins.
        let alerted = Arc::clone(&self.alerted);
        let key = product_key.to_string();
        let window = self.window;
        tokio::spawn(async move {
            tokio::time::sleep(window).await;
            alerted.remove(&key);
        });

        fresh
    }

    #[cfg(test)]
    fn is_alerted(&self, product_key: &str) -> bool {
        self.alerted.contains(product_key)
    }
}

/// Periodic low-stock scan.
///
/// Every `scan_interval`, query products at or below their alert
/// threshold and route each through the deduplicator. Runs until the
/// token is cancelled.
pub async fn run_low_stock_scan(
    products: ProductRepository,
    dedup: AlertDeduplicator,
    scan_interval: Duration,
    shutdown: CancellationToken,
) {
    let mut ticker = interval(scan_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tracing::info!(interval_secs = scan_interval.as_secs(), "Low-stock scan started");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match products.find_low_stock().await {
                    Ok(low) => {
                        for product in low {
                            alert_for(&dedup, &product);
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Low-stock scan query failed");
                    }
                }
            }
            _ = shutdown.cancelled() => {
                tracing::info!("Low-stock scan stopping");
                break;
            }
        }
    }
}

fn alert_for(dedup: &AlertDeduplicator, product: &LowStockProduct) {
    dedup.send_deduplicated_alert(
        &product.id.to_string(),
        format!(
            "{} ({}) is low on stock: {} remaining",
            product.name, product.sku, product.stock_qty
        ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dedup_with_hub(window: Duration) -> (AlertDeduplicator, NotificationHub) {
        let hub = NotificationHub::new();
        (AlertDeduplicator::new(hub.clone(), window), hub)
    }

    #[tokio::test(start_paused = true)]
    async fn second_alert_in_window_is_suppressed() {
        let (dedup, hub) = dedup_with_hub(Duration::from_secs(60));
        let (_id, mut rx) = hub.register("alice");

        assert!(dedup.send_deduplicated_alert("product:w", "first".into()));
        assert!(!dedup.send_deduplicated_alert("product:w", "second".into()));

        assert_eq!(rx.recv().await.unwrap().message, "first");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn alert_rearms_after_the_window() {
        let (dedup, hub) = dedup_with_hub(Duration::from_secs(60));
        let (_id, mut rx) = hub.register("alice");

        assert!(dedup.send_deduplicated_alert("product:w", "first".into()));

        tokio::time::advance(Duration::from_secs(61)).await;
        tokio::task::yield_now().await;
        assert!(!dedup.is_alerted("product:w"));

        assert!(dedup.send_deduplicated_alert("product:w", "again".into()));
        assert_eq!(rx.recv().await.unwrap().message, "first");
        assert_eq!(rx.recv().await.unwrap().message, "again");
    }

    #[tokio::test(start_paused = true)]
    async fn products_are_tracked_independently() {
        let (dedup, hub) = dedup_with_hub(Duration::from_secs(60));
        let (_id, mut rx) = hub.register("alice");

        assert!(dedup.send_deduplicated_alert("product:w", "widget".into()));
        assert!(dedup.send_deduplicated_alert("product:g", "gadget".into()));

        assert_eq!(rx.recv().await.unwrap().message, "widget");
        assert_eq!(rx.recv().await.unwrap().message, "gadget");
    }

    #[tokio::test(start_paused = true)]
    async fn earliest_expiry_clears_the_suppression() {
        let (dedup, _hub) = dedup_with_hub(Duration::from_secs(60));

        dedup.send_deduplicated_alert("product:w", "first".into());
        tokio::time::advance(Duration::from_secs(30)).await;
        tokio::task::yield_now().await;

        // Suppressed call at t=30 schedules a second expiry at t=90, but
        // the first alert's timer still clears the state at t=60.
        dedup.send_deduplicated_alert("product:w", "second".into());
        tokio::time::advance(Duration::from_secs(31)).await;
        tokio::task::yield_now().await;

        assert!(!dedup.is_alerted("product:w"));
    }
}
