//! Sale storage model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::models::{PaymentMethod, Sale as SharedSale, SaleStatus};
use surrealdb::RecordId;

/// Sale record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub order_id: RecordId,
    pub sales_person_id: RecordId,
    pub date_of_sale: DateTime<Utc>,
    pub total_amount: f64,
    pub status: SaleStatus,
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Sale> for SharedSale {
    fn from(s: Sale) -> Self {
        SharedSale {
            id: s.id.map(|id| id.to_string()).unwrap_or_default(),
            order_id: s.order_id.to_string(),
            sales_person_id: s.sales_person_id.to_string(),
            date_of_sale: s.date_of_sale,
            total_amount: s.total_amount,
            status: s.status,
            payment_method: s.payment_method,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}
