//! Item Repository
//!
//! Read-only access to line items. All item mutations go through the
//! inventory ledger so that stock and order totals stay consistent.

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoResult, record_id};
use crate::db::models::Item;

const TABLE: &str = "item";

#[derive(Clone)]
pub struct ItemRepository {
    base: BaseRepository,
}

impl ItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All items, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Item>> {
        let items: Vec<Item> = self
            .base
            .db()
            .query("SELECT * FROM item ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(items)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Item>> {
        let item: Option<Item> = self.base.db().select(record_id(TABLE, id)).await?;
        Ok(item)
    }

    /// Items currently attached to the given order
    pub async fn find_by_order(&self, order_id: &RecordId) -> RepoResult<Vec<Item>> {
        let items: Vec<Item> = self
            .base
            .db()
            .query("SELECT * FROM item WHERE order_id = $order_id ORDER BY created_at DESC")
            .bind(("order_id", order_id.clone()))
            .await?
            .take(0)?;
        Ok(items)
    }
}
