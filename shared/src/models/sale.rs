//! Sale Model
//!
//! A recorded sale against a completed order. `total_amount` and
//! `sales_person_id` are snapshotted from the referenced order at write
//! time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payment method for a sale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Card,
    Transfer,
    Other,
}

/// Sale status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SaleStatus {
    Pending,
    Completed,
    Refunded,
}

/// Sale entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    pub id: String,
    pub order_id: String,
    pub sales_person_id: String,
    pub date_of_sale: DateTime<Utc>,
    /// Snapshot of the order's total at recording time
    pub total_amount: f64,
    pub status: SaleStatus,
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create sale payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleCreate {
    pub order_id: String,
    pub date_of_sale: DateTime<Utc>,
    pub status: SaleStatus,
    pub payment_method: PaymentMethod,
}

/// Update sale payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleUpdate {
    pub order_id: String,
    pub date_of_sale: Option<DateTime<Utc>>,
    pub status: Option<SaleStatus>,
    pub payment_method: Option<PaymentMethod>,
}
