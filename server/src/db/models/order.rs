//! Order storage model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::models::{Order as SharedOrder, OrderStatus};
use surrealdb::RecordId;

use super::Item;

/// Order record
///
/// `total_price` is the derived aggregate maintained by the ledger:
/// always equal to the sum of `total_price` over the items referencing
/// this order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub customer_name: String,
    #[serde(default)]
    pub customer_contact: Option<String>,
    pub sales_person_id: RecordId,
    #[serde(default)]
    pub status: OrderStatus,
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Convert into the API model, attaching the given items.
    pub fn into_shared(self, items: Vec<Item>) -> SharedOrder {
        SharedOrder {
            id: self.id.map(|id| id.to_string()).unwrap_or_default(),
            customer_name: self.customer_name,
            customer_contact: self.customer_contact,
            sales_person_id: self.sales_person_id.to_string(),
            status: self.status,
            total_price: self.total_price,
            created_at: self.created_at,
            updated_at: self.updated_at,
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Order> for SharedOrder {
    fn from(o: Order) -> Self {
        o.into_shared(Vec::new())
    }
}
