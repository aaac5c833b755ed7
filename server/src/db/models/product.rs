//! Product storage model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::models::Product as SharedProduct;
use surrealdb::RecordId;

/// Product record
///
/// `stock_qty` is mutated only inside ledger transactions; the repository
/// update path never writes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub slug: String,
    pub sku: String,
    #[serde(default)]
    pub category_id: Option<RecordId>,
    pub stock_qty: i64,
    pub alert_qty: i64,
    pub buying_price: f64,
    pub selling_price: f64,
    #[serde(default)]
    pub supplier_name: Option<String>,
    #[serde(default)]
    pub supplier_contact: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for SharedProduct {
    fn from(p: Product) -> Self {
        SharedProduct {
            id: p.id.map(|id| id.to_string()).unwrap_or_default(),
            name: p.name,
            description: p.description,
            slug: p.slug,
            sku: p.sku,
            category_id: p.category_id.map(|id| id.to_string()),
            stock_qty: p.stock_qty,
            alert_qty: p.alert_qty,
            buying_price: p.buying_price,
            selling_price: p.selling_price,
            supplier_name: p.supplier_name,
            supplier_contact: p.supplier_contact,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Row shape for the low-stock scan
#[derive(Debug, Clone, Deserialize)]
pub struct LowStockProduct {
    pub id: RecordId,
    pub name: String,
    pub sku: String,
    pub stock_qty: i64,
}
