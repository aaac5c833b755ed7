//! Inventory Ledger
//!
//! The one component allowed to mutate the three coupled aggregates:
//! `product.stock_qty`, `item.quantity`/`item.total_price` and
//! `order.total_price`. Every operation is one atomic multi-statement
//! transaction; either the whole write set commits or none of it does.
//!
//! Invariants enforced here:
//!
//! 1. `order.total_price == Σ item.total_price` over the order's items
//! 2. `product.stock_qty >= 0`, always evaluated against the post-delta
//!    value, not a pre-operation snapshot
//! 3. `item.total_price` is a snapshot of `quantity * selling_price`
//!    taken at write time, never recomputed on read
//!
//! All aggregate updates are increment/decrement based (`+=` / `-=`), so
//! concurrent operations on different items sharing a product or an order
//! compose without lost updates. Preconditions are checked before the
//! transaction opens; anything discovered inside the transaction aborts
//! it via `THROW`, which rolls back every statement.

use chrono::Utc;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;
use thiserror::Error;

use crate::db::models::{Item, Order, Product};
use crate::db::repository::record_id;

#[cfg(test)]
mod tests;

// Sentinels thrown inside transactions; the error mapper looks for them
// in the statement errors of an aborted transaction.
const T_INSUFFICIENT_STOCK: &str = "INSUFFICIENT_STOCK";
const T_PRODUCT_MISSING: &str = "PRODUCT_MISSING";
const T_ORDER_MISSING: &str = "ORDER_MISSING";
const T_ITEM_MISSING: &str = "ITEM_MISSING";

/// Ledger error taxonomy
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Referenced product, order or item does not exist. No retry.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Requested quantity exceeds the available stock (post-delta).
    /// The caller must resubmit with a valid value.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    /// The atomic write set failed at the storage layer (e.g. a
    /// concurrent conflict). Nothing was written; safe to retry.
    #[error("Transaction aborted: {0}")]
    TransactionAborted(String),

    /// An item references an order or product that vanished after the
    /// precondition reads. Data-integrity fault: logged, not repaired.
    #[error("Data integrity fault: {0}")]
    IntegrityFault(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

/// The inventory ledger. Cheap to construct per request; the database
/// handle is internally shared.
#[derive(Clone)]
pub struct InventoryLedger {
    db: Surreal<Db>,
}

impl InventoryLedger {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    // =========================================================================
    // reserve-and-record: create an item
    // =========================================================================

    /// Reserve `quantity` units of a product against an order and record
    /// the line item.
    ///
    /// Atomically: insert the item with `total_price = quantity *
    /// selling_price`, decrement the product's stock, increment the
    /// order's total.
    pub async fn reserve_and_record(
        &self,
        product_id: &str,
        order_id: &str,
        quantity: i64,
    ) -> LedgerResult<Item> {
        if quantity <= 0 {
            return Err(LedgerError::InvalidQuantity(
                "Quantity must be a positive integer".into(),
            ));
        }

        let product_id = record_id("product", product_id);
        let order_id = record_id("order", order_id);

        let product = self.read_product(&product_id).await?.ok_or_else(|| {
            LedgerError::NotFound(format!("Product {product_id} does not exist"))
        })?;
        self.read_order(&order_id)
            .await?
            .ok_or_else(|| LedgerError::NotFound(format!("Order {order_id} not found")))?;

        if quantity > product.stock_qty {
            return Err(LedgerError::InvalidQuantity(
                "Quantity is greater than what is in stock".into(),
            ));
        }

        let item_id = new_item_id();
        let query = format!(
            r#"
            BEGIN TRANSACTION;
            LET $p = (UPDATE $product SET stock_qty -= $quantity, updated_at = $now RETURN AFTER)[0];
            IF $p == NONE {{ THROW "{T_PRODUCT_MISSING}" }};
            IF $p.stock_qty < 0 {{ THROW "{T_INSUFFICIENT_STOCK}" }};
            LET $total = $p.selling_price * $quantity;
            LET $o = (UPDATE $order SET total_price += $total, updated_at = $now RETURN AFTER)[0];
            IF $o == NONE {{ THROW "{T_ORDER_MISSING}" }};
            CREATE $item CONTENT {{
                product_id: $product,
                order_id: $order,
                quantity: $quantity,
                total_price: $total,
                created_at: $now,
                updated_at: $now
            }};
            COMMIT TRANSACTION;
            "#
        );

        self.run_transaction(
            self.db
                .query(query)
                .bind(("product", product_id.clone()))
                .bind(("order", order_id.clone()))
                .bind(("item", item_id.clone()))
                .bind(("quantity", quantity))
                .bind(("now", Utc::now())),
        )
        .await?;

        tracing::debug!(item = %item_id, product = %product_id, quantity, "Stock reserved");
        self.read_committed_item(&item_id).await
    }

    // =========================================================================
    // reconcile: update an item
    // =========================================================================

    /// Move an existing item to a (possibly different) product, order
    /// and quantity, keeping every aggregate consistent.
    ///
    /// Stock sufficiency counts the quantity this item already holds
    /// against the *same* product as available (the reservation would be
    /// freed first), so shrinking or re-homing never produces a false
    /// insufficient-stock rejection. A different target product is
    /// checked against its raw stock.
    pub async fn reconcile(
        &self,
        item_id: &str,
        new_product_id: &str,
        new_order_id: &str,
        new_quantity: i64,
    ) -> LedgerResult<Item> {
        if new_quantity <= 0 {
            return Err(LedgerError::InvalidQuantity(
                "Quantity must be a positive integer".into(),
            ));
        }

        let item_id = record_id("item", item_id);
        let new_product_id = record_id("product", new_product_id);
        let new_order_id = record_id("order", new_order_id);

        let item = self
            .read_item(&item_id)
            .await?
            .ok_or_else(|| LedgerError::NotFound(format!("Item {item_id} not found")))?;

        // The item's current product must still exist; if it vanished the
        // store is inconsistent and we refuse to guess.
        if self.read_product(&item.product_id).await?.is_none() {
            tracing::error!(item = %item_id, product = %item.product_id,
                "Item references a product that no longer exists");
            return Err(LedgerError::IntegrityFault(format!(
                "Item {item_id} references missing product {}",
                item.product_id
            )));
        }

        let target = self.read_product(&new_product_id).await?.ok_or_else(|| {
            LedgerError::NotFound(format!("Product {new_product_id} does not exist"))
        })?;
        self.read_order(&new_order_id)
            .await?
            .ok_or_else(|| LedgerError::NotFound(format!("Order {new_order_id} not found")))?;

        let same_product = item.product_id == new_product_id;
        let same_order = item.order_id == new_order_id;

        // No-op short-circuit: nothing to move, nothing to recompute. A
        // changed order still runs the transaction, the re-home moves the
        // item's total between the two orders.
        if same_product && same_order && new_quantity == item.quantity {
            return Ok(item);
        }

        // Stock the item itself would free up counts as available.
        let available = if same_product {
            target.stock_qty + item.quantity
        } else {
            target.stock_qty
        };
        if new_quantity > available {
            return Err(LedgerError::InvalidQuantity(
                "Quantity is greater than what is in stock".into(),
            ));
        }

        let new_total = target.selling_price * new_quantity as f64;

        let mut query = String::from("BEGIN TRANSACTION;\n");
        query.push_str(
            "LET $it = (UPDATE $item SET product_id = $new_product, order_id = $new_order, \
             quantity = $new_qty, total_price = $new_total, updated_at = $now RETURN AFTER)[0];\n",
        );
        query.push_str(&format!("IF $it == NONE {{ THROW \"{T_ITEM_MISSING}\" }};\n"));

        if same_product {
            // One signed delta covers both grow and shrink.
            query.push_str(
                "LET $p = (UPDATE $new_product SET stock_qty -= $stock_delta, \
                 updated_at = $now RETURN AFTER)[0];\n",
            );
            query.push_str(&format!(
                "IF $p == NONE {{ THROW \"{T_PRODUCT_MISSING}\" }};\n\
                 IF $p.stock_qty < 0 {{ THROW \"{T_INSUFFICIENT_STOCK}\" }};\n"
            ));
        } else {
            // Different stock pool: full release on the old product,
            // full reservation on the new one.
            query.push_str(
                "LET $p = (UPDATE $new_product SET stock_qty -= $new_qty, \
                 updated_at = $now RETURN AFTER)[0];\n",
            );
            query.push_str(&format!(
                "IF $p == NONE {{ THROW \"{T_PRODUCT_MISSING}\" }};\n\
                 IF $p.stock_qty < 0 {{ THROW \"{T_INSUFFICIENT_STOCK}\" }};\n"
            ));
            query.push_str(
                "LET $old_p = (UPDATE $old_product SET stock_qty += $old_qty, \
                 updated_at = $now RETURN AFTER)[0];\n",
            );
            query.push_str(&format!(
                "IF $old_p == NONE {{ THROW \"{T_PRODUCT_MISSING}\" }};\n"
            ));
        }

        if same_order {
            // Delta-replace: concurrent sibling items on the same order
            // are unaffected.
            query.push_str(
                "LET $o = (UPDATE $new_order SET total_price += $total_delta, \
                 updated_at = $now RETURN AFTER)[0];\n",
            );
            query.push_str(&format!("IF $o == NONE {{ THROW \"{T_ORDER_MISSING}\" }};\n"));
        } else {
            query.push_str(
                "LET $old_o = (UPDATE $old_order SET total_price -= $old_total, \
                 updated_at = $now RETURN AFTER)[0];\n",
            );
            query.push_str(&format!(
                "IF $old_o == NONE {{ THROW \"{T_ORDER_MISSING}\" }};\n"
            ));
            query.push_str(
                "LET $o = (UPDATE $new_order SET total_price += $new_total, \
                 updated_at = $now RETURN AFTER)[0];\n",
            );
            query.push_str(&format!("IF $o == NONE {{ THROW \"{T_ORDER_MISSING}\" }};\n"));
        }

        query.push_str("COMMIT TRANSACTION;");

        self.run_transaction(
            self.db
                .query(query)
                .bind(("item", item_id.clone()))
                .bind(("new_product", new_product_id.clone()))
                .bind(("old_product", item.product_id.clone()))
                .bind(("new_order", new_order_id.clone()))
                .bind(("old_order", item.order_id.clone()))
                .bind(("new_qty", new_quantity))
                .bind(("old_qty", item.quantity))
                .bind(("stock_delta", new_quantity - item.quantity))
                .bind(("new_total", new_total))
                .bind(("old_total", item.total_price))
                .bind(("total_delta", new_total - item.total_price))
                .bind(("now", Utc::now())),
        )
        .await?;

        tracing::debug!(item = %item_id, product = %new_product_id, quantity = new_quantity,
            "Item reconciled");
        self.read_committed_item(&item_id).await
    }

    // =========================================================================
    // release: delete an item
    // =========================================================================

    /// Delete an item, returning its quantity to the product's stock and
    /// deducting its snapshot price from the order's total.
    pub async fn release(&self, item_id: &str) -> LedgerResult<()> {
        let item_id = record_id("item", item_id);

        let item = self
            .read_item(&item_id)
            .await?
            .ok_or_else(|| LedgerError::NotFound(format!("Item {item_id} not found")))?;

        if self.read_order(&item.order_id).await?.is_none() {
            tracing::error!(item = %item_id, order = %item.order_id,
                "Item references an order that no longer exists");
            return Err(LedgerError::IntegrityFault(format!(
                "Item {item_id} references missing order {}",
                item.order_id
            )));
        }

        let query = format!(
            r#"
            BEGIN TRANSACTION;
            LET $p = (UPDATE $product SET stock_qty += $quantity, updated_at = $now RETURN AFTER)[0];
            IF $p == NONE {{ THROW "{T_PRODUCT_MISSING}" }};
            LET $o = (UPDATE $order SET total_price -= $total, updated_at = $now RETURN AFTER)[0];
            IF $o == NONE {{ THROW "{T_ORDER_MISSING}" }};
            DELETE $item;
            COMMIT TRANSACTION;
            "#
        );

        self.run_transaction(
            self.db
                .query(query)
                .bind(("item", item_id.clone()))
                .bind(("product", item.product_id.clone()))
                .bind(("order", item.order_id.clone()))
                .bind(("quantity", item.quantity))
                .bind(("total", item.total_price))
                .bind(("now", Utc::now())),
        )
        .await?;

        tracing::debug!(item = %item_id, "Reservation released");
        Ok(())
    }

    // =========================================================================
    // release_order: delete an order and every item it holds
    // =========================================================================

    /// Delete an order, atomically releasing every attached item's stock
    /// back to its product.
    pub async fn release_order(&self, order_id: &str) -> LedgerResult<()> {
        let order_id = record_id("order", order_id);

        self.read_order(&order_id)
            .await?
            .ok_or_else(|| LedgerError::NotFound(format!("Order {order_id} not found")))?;

        let query = format!(
            r#"
            BEGIN TRANSACTION;
            LET $items = (SELECT * FROM item WHERE order_id = $order);
            FOR $it IN $items {{
                LET $p = (UPDATE $it.product_id SET stock_qty += $it.quantity, updated_at = $now RETURN AFTER)[0];
                IF $p == NONE {{ THROW "{T_PRODUCT_MISSING}" }};
                DELETE $it.id;
            }};
            DELETE $order;
            COMMIT TRANSACTION;
            "#
        );

        self.run_transaction(
            self.db
                .query(query)
                .bind(("order", order_id.clone()))
                .bind(("now", Utc::now())),
        )
        .await?;

        tracing::debug!(order = %order_id, "Order deleted, reservations released");
        Ok(())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    async fn read_product(&self, id: &RecordId) -> LedgerResult<Option<Product>> {
        self.db
            .select(id.clone())
            .await
            .map_err(|e| LedgerError::Database(e.to_string()))
    }

    async fn read_order(&self, id: &RecordId) -> LedgerResult<Option<Order>> {
        self.db
            .select(id.clone())
            .await
            .map_err(|e| LedgerError::Database(e.to_string()))
    }

    async fn read_item(&self, id: &RecordId) -> LedgerResult<Option<Item>> {
        self.db
            .select(id.clone())
            .await
            .map_err(|e| LedgerError::Database(e.to_string()))
    }

    /// An item we just committed must be readable; anything else is a
    /// storage fault.
    async fn read_committed_item(&self, id: &RecordId) -> LedgerResult<Item> {
        self.read_item(id)
            .await?
            .ok_or_else(|| LedgerError::Database(format!("Committed item {id} not readable")))
    }

    /// Execute a transaction query and map its failure mode.
    ///
    /// When a transaction aborts, every statement reports an error and
    /// only the one that threw carries the sentinel, so all statement
    /// errors are scanned.
    async fn run_transaction(
        &self,
        query: surrealdb::method::Query<'_, Db>,
    ) -> LedgerResult<()> {
        let mut response = query
            .await
            .map_err(|e| LedgerError::Database(e.to_string()))?;

        let errors = response.take_errors();
        if errors.is_empty() {
            return Ok(());
        }

        let messages: Vec<String> = errors.values().map(|e| e.to_string()).collect();

        if messages.iter().any(|m| m.contains(T_INSUFFICIENT_STOCK)) {
            return Err(LedgerError::InvalidQuantity(
                "Quantity is greater than what is in stock".into(),
            ));
        }
        for (sentinel, what) in [
            (T_PRODUCT_MISSING, "product"),
            (T_ORDER_MISSING, "order"),
            (T_ITEM_MISSING, "item"),
        ] {
            if messages.iter().any(|m| m.contains(sentinel)) {
                tracing::error!(entity = what, "Referenced {what} vanished mid-transaction");
                return Err(LedgerError::IntegrityFault(format!(
                    "Referenced {what} vanished mid-transaction"
                )));
            }
        }

        Err(LedgerError::TransactionAborted(messages.join("; ")))
    }
}

/// Client-generated item key, so the committed record can be re-read
/// without racing a concurrent mutation on a server-chosen id.
fn new_item_id() -> RecordId {
    RecordId::from_table_key("item", uuid::Uuid::new_v4().simple().to_string())
}
