//! Item storage model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::models::Item as SharedItem;
use surrealdb::RecordId;

/// Line item record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub product_id: RecordId,
    pub order_id: RecordId,
    pub quantity: i64,
    /// Snapshot: `quantity * selling_price` at write time
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Item> for SharedItem {
    fn from(i: Item) -> Self {
        SharedItem {
            id: i.id.map(|id| id.to_string()).unwrap_or_default(),
            product_id: i.product_id.to_string(),
            order_id: i.order_id.to_string(),
            quantity: i.quantity,
            total_price: i.total_price,
            created_at: i.created_at,
            updated_at: i.updated_at,
        }
    }
}
