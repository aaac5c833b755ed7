//! Order Repository
//!
//! CRUD for orders' descriptive fields. `total_price` is the ledger's
//! aggregate: it starts at zero on creation and is only ever changed
//! inside ledger transactions. Order deletion is also a ledger operation
//! (it releases every attached item).

use chrono::Utc;
use shared::models::{OrderCreate, OrderUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::Order;

const TABLE: &str = "order";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Paginated listing, newest first. `page` is 1-based.
    pub async fn find_page(&self, page: u64, limit: u64) -> RepoResult<Vec<Order>> {
        let start = page.saturating_sub(1) * limit;
        let orders: Vec<Order> = self
            .base
            .db()
            .query(
                "SELECT * FROM type::table('order') ORDER BY created_at DESC \
                 LIMIT $limit START $start",
            )
            .bind(("limit", limit))
            .bind(("start", start))
            .await?
            .take(0)?;
        Ok(orders)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let order: Option<Order> = self.base.db().select(record_id(TABLE, id)).await?;
        Ok(order)
    }

    /// Orders belonging to one salesperson, newest first
    pub async fn find_by_sales_person(&self, sales_person_id: &str) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query(
                "SELECT * FROM type::table('order') WHERE sales_person_id = $sp \
                 ORDER BY created_at DESC",
            )
            .bind(("sp", record_id("user", sales_person_id)))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Create an order. It always starts empty: `total_price = 0`.
    pub async fn create(&self, data: OrderCreate) -> RepoResult<Order> {
        let now = Utc::now();
        let order = Order {
            id: None,
            customer_name: data.customer_name,
            customer_contact: data.customer_contact,
            sales_person_id: record_id("user", &data.sales_person_id),
            status: data.status.unwrap_or_default(),
            total_price: 0.0,
            created_at: now,
            updated_at: now,
        };

        let created: Option<Order> = self.base.db().create(TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Update descriptive fields only; the total is untouchable here.
    pub async fn update(&self, id: &str, data: OrderUpdate) -> RepoResult<Order> {
        let mut order = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {id}")))?;

        if let Some(customer_name) = data.customer_name {
            order.customer_name = customer_name;
        }
        if let Some(customer_contact) = data.customer_contact {
            order.customer_contact = Some(customer_contact);
        }
        if let Some(sales_person_id) = data.sales_person_id {
            order.sales_person_id = record_id("user", &sales_person_id);
        }
        if let Some(status) = data.status {
            order.status = status;
        }
        order.updated_at = Utc::now();

        let updated: Option<Order> = self
            .base
            .db()
            .update(record_id(TABLE, id))
            .content(order)
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Order {id}")))
    }
}
