//! Item Model
//!
//! A stock-bearing line item: the association of a quantity of one product
//! with one order. Items are created, edited and removed exclusively through
//! the inventory ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Line item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub product_id: String,
    pub order_id: String,
    /// Reserved quantity (positive)
    pub quantity: i64,
    /// Price snapshot taken at write time: `quantity * selling_price`.
    /// Not recomputed on read, so historical order totals stay stable
    /// when product pricing changes later.
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCreate {
    pub product_id: String,
    pub order_id: String,
    pub quantity: i64,
}

/// Update item payload
///
/// All three fields are required: an item update is a full restatement of
/// what the item holds and where it belongs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemUpdate {
    pub product_id: String,
    pub order_id: String,
    pub quantity: i64,
}
