//! Product Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Product entity
///
/// `stock_qty` is owned by the inventory ledger: after creation it is only
/// ever mutated as a side effect of item operations, never through the
/// product endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub slug: String,
    pub sku: String,
    #[serde(default)]
    pub category_id: Option<String>,
    /// Units currently on hand (never negative)
    pub stock_qty: i64,
    /// Low-stock alert threshold
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

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub description: Option<String>,
    pub slug: String,
    pub sku: String,
    pub category_id: Option<String>,
    /// Initial stock baseline
    #[serde(default)]
    pub stock_qty: i64,
    #[serde(default)]
    pub alert_qty: i64,
    pub buying_price: f64,
    pub selling_price: f64,
    pub supplier_name: Option<String>,
    pub supplier_contact: Option<String>,
}

/// Update product payload (partial)
///
/// Deliberately has no `stock_qty` field: stock mutations go through the
/// ledger only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub slug: Option<String>,
    pub sku: Option<String>,
    pub category_id: Option<String>,
    pub alert_qty: Option<i64>,
    pub buying_price: Option<f64>,
    pub selling_price: Option<f64>,
    pub supplier_name: Option<String>,
    pub supplier_contact: Option<String>,
}
