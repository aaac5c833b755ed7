//! Order Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Item;

/// Order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

/// Order entity
///
/// `total_price` is a derived aggregate: it must always equal the sum of
/// `total_price` over the items currently referencing this order. It is
/// maintained incrementally by the inventory ledger and is not writable
/// through the order endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub customer_name: String,
    #[serde(default)]
    pub customer_contact: Option<String>,
    pub sales_person_id: String,
    #[serde(default)]
    pub status: OrderStatus,
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Items referencing this order (populated on detail reads)
    #[serde(default)]
    pub items: Vec<Item>,
}

/// Create order payload
///
/// A new order always starts empty with `total_price = 0`; items are
/// attached afterwards through the item endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub customer_name: String,
    pub customer_contact: Option<String>,
    pub sales_person_id: String,
    pub status: Option<OrderStatus>,
}

/// Update order payload — descriptive fields only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub customer_name: Option<String>,
    pub customer_contact: Option<String>,
    pub sales_person_id: Option<String>,
    pub status: Option<OrderStatus>,
}
