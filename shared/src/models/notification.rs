//! Notification event types
//!
//! Events pushed to streaming subscribers by the notification hub.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of notification event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    #[serde(rename = "LOW-STOCK")]
    LowStock,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationKind::LowStock => write!(f, "LOW-STOCK"),
        }
    }
}

/// A single notification event, serialized as the SSE payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationEvent {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl NotificationEvent {
    pub fn low_stock(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::LowStock,
            message: message.into(),
            created_at: Utc::now(),
        }
    }
}
