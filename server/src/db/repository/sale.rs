//! Sale Repository

use chrono::Utc;
use shared::models::{PaymentMethod, SaleStatus};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::Sale;

const TABLE: &str = "sale";

/// Fields resolved by the handler before a sale is written: the order
/// snapshot (total + salesperson) plus the client-supplied values.
pub struct SaleWrite {
    pub order_id: RecordId,
    pub sales_person_id: RecordId,
    pub date_of_sale: chrono::DateTime<Utc>,
    pub total_amount: f64,
    pub status: SaleStatus,
    pub payment_method: PaymentMethod,
}

#[derive(Clone)]
pub struct SaleRepository {
    base: BaseRepository,
}

impl SaleRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All sales, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Sale>> {
        let sales: Vec<Sale> = self
            .base
            .db()
            .query("SELECT * FROM sale ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(sales)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Sale>> {
        let sale: Option<Sale> = self.base.db().select(record_id(TABLE, id)).await?;
        Ok(sale)
    }

    /// Sales recorded for one salesperson, newest first
    pub async fn find_by_sales_person(&self, sales_person_id: &str) -> RepoResult<Vec<Sale>> {
        let sales: Vec<Sale> = self
            .base
            .db()
            .query("SELECT * FROM sale WHERE sales_person_id = $sp ORDER BY created_at DESC")
            .bind(("sp", record_id("user", sales_person_id)))
            .await?
            .take(0)?;
        Ok(sales)
    }

    pub async fn create(&self, data: SaleWrite) -> RepoResult<Sale> {
        let now = Utc::now();
        let sale = Sale {
            id: None,
            order_id: data.order_id,
            sales_person_id: data.sales_person_id,
            date_of_sale: data.date_of_sale,
            total_amount: data.total_amount,
            status: data.status,
            payment_method: data.payment_method,
            created_at: now,
            updated_at: now,
        };

        let created: Option<Sale> = self.base.db().create(TABLE).content(sale).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create sale".to_string()))
    }

    pub async fn update(&self, id: &str, data: SaleWrite) -> RepoResult<Sale> {
        let mut sale = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Sale {id}")))?;

        sale.order_id = data.order_id;
        sale.sales_person_id = data.sales_person_id;
        sale.date_of_sale = data.date_of_sale;
        sale.total_amount = data.total_amount;
        sale.status = data.status;
        sale.payment_method = data.payment_method;
        sale.updated_at = Utc::now();

        let updated: Option<Sale> = self
            .base
            .db()
            .update(record_id(TABLE, id))
            .content(sale)
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Sale {id}")))
    }
}
