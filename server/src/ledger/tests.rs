use chrono::Utc;
use surrealdb::RecordId;

use super::*;
use crate::db::DbService;
use crate::db::models::{Item, Order, Product};
use crate::db::repository::record_id;
use shared::models::OrderStatus;

async fn ledger() -> (DbService, InventoryLedger) {
    let db = DbService::memory().await.unwrap();
    let ledger = InventoryLedger::new(db.db.clone());
    (db, ledger)
}

async fn seed_product(db: &DbService, name: &str, stock_qty: i64, selling_price: f64) -> String {
    let now = Utc::now();
    let product: Option<Product> = db
        .db
        .create("product")
        .content(Product {
            id: None,
            name: name.to_string(),
            description: None,
            slug: name.to_lowercase().replace(' ', "-"),
            sku: format!("SKU-{name}"),
            category_id: None,
            stock_qty,
            alert_qty: 3,
            buying_price: selling_price * 0.6,
            selling_price,
            supplier_name: None,
            supplier_contact: None,
            created_at: now,
            updated_at: now,
        })
        .await
        .unwrap();
    product.unwrap().id.unwrap().key().to_string()
}

async fn seed_order(db: &DbService, customer: &str) -> String {
    let now = Utc::now();
    let order: Option<Order> = db
        .db
        .create("order")
        .content(Order {
            id: None,
            customer_name: customer.to_string(),
            customer_contact: None,
            sales_person_id: RecordId::from_table_key("user", "seed"),
            status: OrderStatus::Pending,
            total_price: 0.0,
            created_at: now,
            updated_at: now,
        })
        .await
        .unwrap();
    order.unwrap().id.unwrap().key().to_string()
}

async fn product_stock(db: &DbService, id: &str) -> i64 {
    let p: Option<Product> = db.db.select(record_id("product", id)).await.unwrap();
    p.unwrap().stock_qty
}

async fn order_total(db: &DbService, id: &str) -> f64 {
    let o: Option<Order> = db.db.select(record_id("order", id)).await.unwrap();
    o.unwrap().total_price
}

async fn order_items(db: &DbService, id: &str) -> Vec<Item> {
    db.db
        .query("SELECT * FROM item WHERE order_id = $o")
        .bind(("o", record_id("order", id)))
        .await
        .unwrap()
        .take(0)
        .unwrap()
}

async fn assert_order_consistent(db: &DbService, order_id: &str) {
    let total = order_total(db, order_id).await;
    let sum: f64 = order_items(db, order_id)
        .await
        .iter()
        .map(|it| it.total_price)
        .sum();
    assert!(
        (total - sum).abs() < 1e-9,
        "order total {total} != item sum {sum}"
    );
}

#[tokio::test]
async fn reserve_moves_stock_and_totals_together() {
    let (db, ledger) = ledger().await;
    let product = seed_product(&db, "Widget", 10, 4.5).await;
    let order = seed_order(&db, "Alice").await;

    let item = ledger.reserve_and_record(&product, &order, 3).await.unwrap();

    assert_eq!(item.quantity, 3);
    assert!((item.total_price - 13.5).abs() < 1e-9);
    assert_eq!(product_stock(&db, &product).await, 7);
    assert!((order_total(&db, &order).await - 13.5).abs() < 1e-9);
    assert_order_consistent(&db, &order).await;
}

#[tokio::test]
async fn reserve_entire_stock_is_allowed() {
    let (db, ledger) = ledger().await;
    let product = seed_product(&db, "Widget", 5, 2.0).await;
    let order = seed_order(&db, "Alice").await;

    ledger.reserve_and_record(&product, &order, 5).await.unwrap();

    assert_eq!(product_stock(&db, &product).await, 0);
}

#[tokio::test]
async fn reserve_beyond_stock_is_rejected_and_writes_nothing() {
    let (db, ledger) = ledger().await;
    let product = seed_product(&db, "Widget", 5, 2.0).await;
    let order = seed_order(&db, "Alice").await;

    let err = ledger
        .reserve_and_record(&product, &order, 6)
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidQuantity(_)));

    assert_eq!(product_stock(&db, &product).await, 5);
    assert_eq!(order_total(&db, &order).await, 0.0);
    assert!(order_items(&db, &order).await.is_empty());
}

#[tokio::test]
async fn reserve_rejects_non_positive_quantity() {
    let (db, ledger) = ledger().await;
    let product = seed_product(&db, "Widget", 5, 2.0).await;
    let order = seed_order(&db, "Alice").await;

    for qty in [0, -1] {
        let err = ledger
            .reserve_and_record(&product, &order, qty)
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidQuantity(_)));
    }
}

#[tokio::test]
async fn reserve_against_unknown_references_is_not_found() {
    let (db, ledger) = ledger().await;
    let product = seed_product(&db, "Widget", 5, 2.0).await;
    let order = seed_order(&db, "Alice").await;

    let err = ledger
        .reserve_and_record("nope", &order, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::NotFound(_)));

    let err = ledger
        .reserve_and_record(&product, "nope", 1)
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::NotFound(_)));
}

#[tokio::test]
async fn reconcile_grow_and_shrink_adjust_by_delta() {
    let (db, ledger) = ledger().await;
    let product = seed_product(&db, "Widget", 10, 2.0).await;
    let order = seed_order(&db, "Alice").await;

    let item = ledger.reserve_and_record(&product, &order, 4).await.unwrap();
    let item_key = item.id.unwrap().key().to_string();

    // Grow 4 -> 7
    let updated = ledger
        .reconcile(&item_key, &product, &order, 7)
        .await
        .unwrap();
    assert_eq!(updated.quantity, 7);
    assert!((updated.total_price - 14.0).abs() < 1e-9);
    assert_eq!(product_stock(&db, &product).await, 3);
    assert_order_consistent(&db, &order).await;

    // Shrink 7 -> 2
    ledger
        .reconcile(&item_key, &product, &order, 2)
        .await
        .unwrap();
    assert_eq!(product_stock(&db, &product).await, 8);
    assert!((order_total(&db, &order).await - 4.0).abs() < 1e-9);
    assert_order_consistent(&db, &order).await;
}

#[tokio::test]
async fn reconcile_counts_own_reservation_as_available() {
    let (db, ledger) = ledger().await;
    let product = seed_product(&db, "Widget", 5, 2.0).await;
    let order = seed_order(&db, "Alice").await;

    let item = ledger.reserve_and_record(&product, &order, 5).await.unwrap();
    let item_key = item.id.unwrap().key().to_string();
    assert_eq!(product_stock(&db, &product).await, 0);

    // stock is 0 but the item holds 5, so up to 5 stays reachable
    ledger
        .reconcile(&item_key, &product, &order, 5)
        .await
        .unwrap();

    let err = ledger
        .reconcile(&item_key, &product, &order, 6)
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidQuantity(_)));
    assert_eq!(product_stock(&db, &product).await, 0);
}

#[tokio::test]
async fn reconcile_same_values_is_a_no_op() {
    let (db, ledger) = ledger().await;
    let product = seed_product(&db, "Widget", 10, 2.0).await;
    let order = seed_order(&db, "Alice").await;

    let item = ledger.reserve_and_record(&product, &order, 4).await.unwrap();
    let item_key = item.id.clone().unwrap().key().to_string();
    let before = item.updated_at;

    let unchanged = ledger
        .reconcile(&item_key, &product, &order, 4)
        .await
        .unwrap();

    assert_eq!(unchanged.updated_at, before);
    assert_eq!(product_stock(&db, &product).await, 6);
    assert_order_consistent(&db, &order).await;
}

#[tokio::test]
async fn reconcile_across_products_moves_the_reservation() {
    let (db, ledger) = ledger().await;
    let widget = seed_product(&db, "Widget", 10, 2.0).await;
    let gadget = seed_product(&db, "Gadget", 4, 5.0).await;
    let order = seed_order(&db, "Alice").await;

    let item = ledger.reserve_and_record(&widget, &order, 6).await.unwrap();
    let item_key = item.id.unwrap().key().to_string();

    let updated = ledger
        .reconcile(&item_key, &gadget, &order, 3)
        .await
        .unwrap();

    // Old product gets all 6 back; new product loses 3.
    assert_eq!(product_stock(&db, &widget).await, 10);
    assert_eq!(product_stock(&db, &gadget).await, 1);
    // Price snapshot follows the new product.
    assert!((updated.total_price - 15.0).abs() < 1e-9);
    assert!((order_total(&db, &order).await - 15.0).abs() < 1e-9);
    assert_order_consistent(&db, &order).await;
}

#[tokio::test]
async fn reconcile_to_new_product_checks_raw_stock() {
    let (db, ledger) = ledger().await;
    let widget = seed_product(&db, "Widget", 10, 2.0).await;
    let gadget = seed_product(&db, "Gadget", 4, 5.0).await;
    let order = seed_order(&db, "Alice").await;

    let item = ledger.reserve_and_record(&widget, &order, 6).await.unwrap();
    let item_key = item.id.unwrap().key().to_string();

    // The 6 units held against the widget do not count for the gadget.
    let err = ledger
        .reconcile(&item_key, &gadget, &order, 5)
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidQuantity(_)));

    // Rejection left everything in place.
    assert_eq!(product_stock(&db, &widget).await, 4);
    assert_eq!(product_stock(&db, &gadget).await, 4);
    assert_order_consistent(&db, &order).await;
}

#[tokio::test]
async fn reconcile_rehomes_item_between_orders() {
    let (db, ledger) = ledger().await;
    let product = seed_product(&db, "Widget", 10, 2.0).await;
    let first = seed_order(&db, "Alice").await;
    let second = seed_order(&db, "Bob").await;

    let item = ledger.reserve_and_record(&product, &first, 4).await.unwrap();
    let item_key = item.id.unwrap().key().to_string();

    ledger
        .reconcile(&item_key, &product, &second, 5)
        .await
        .unwrap();

    assert_eq!(order_total(&db, &first).await, 0.0);
    assert!((order_total(&db, &second).await - 10.0).abs() < 1e-9);
    assert_eq!(product_stock(&db, &product).await, 5);
    assert_order_consistent(&db, &first).await;
    assert_order_consistent(&db, &second).await;
}

#[tokio::test]
async fn reconcile_rehomes_even_with_unchanged_product_and_quantity() {
    let (db, ledger) = ledger().await;
    let product = seed_product(&db, "Widget", 10, 2.0).await;
    let first = seed_order(&db, "Alice").await;
    let second = seed_order(&db, "Bob").await;

    let item = ledger.reserve_and_record(&product, &first, 4).await.unwrap();
    let item_key = item.id.unwrap().key().to_string();

    // Same product, same quantity, new order: not a no-op.
    ledger
        .reconcile(&item_key, &product, &second, 4)
        .await
        .unwrap();

    assert_eq!(order_total(&db, &first).await, 0.0);
    assert!((order_total(&db, &second).await - 8.0).abs() < 1e-9);
    // Stock position is untouched by a pure re-home.
    assert_eq!(product_stock(&db, &product).await, 6);
    assert_order_consistent(&db, &first).await;
    assert_order_consistent(&db, &second).await;
}

#[tokio::test]
async fn release_returns_stock_and_deducts_total() {
    let (db, ledger) = ledger().await;
    let product = seed_product(&db, "Widget", 10, 2.0).await;
    let order = seed_order(&db, "Alice").await;

    let kept = ledger.reserve_and_record(&product, &order, 2).await.unwrap();
    let released = ledger.reserve_and_record(&product, &order, 3).await.unwrap();
    let released_key = released.id.unwrap().key().to_string();

    ledger.release(&released_key).await.unwrap();

    assert_eq!(product_stock(&db, &product).await, 8);
    assert!((order_total(&db, &order).await - kept.total_price).abs() < 1e-9);
    let remaining = order_items(&db, &order).await;
    assert_eq!(remaining.len(), 1);
    assert_order_consistent(&db, &order).await;
}

#[tokio::test]
async fn release_unknown_item_is_not_found() {
    let (_db, ledger) = ledger().await;
    let err = ledger.release("nope").await.unwrap_err();
    assert!(matches!(err, LedgerError::NotFound(_)));
}

#[tokio::test]
async fn release_order_frees_every_reservation() {
    let (db, ledger) = ledger().await;
    let widget = seed_product(&db, "Widget", 10, 2.0).await;
    let gadget = seed_product(&db, "Gadget", 8, 5.0).await;
    let order = seed_order(&db, "Alice").await;
    let other = seed_order(&db, "Bob").await;

    ledger.reserve_and_record(&widget, &order, 4).await.unwrap();
    ledger.reserve_and_record(&gadget, &order, 3).await.unwrap();
    ledger.reserve_and_record(&widget, &other, 2).await.unwrap();

    ledger.release_order(&order).await.unwrap();

    // Both products regain exactly what the deleted order held.
    assert_eq!(product_stock(&db, &widget).await, 8);
    assert_eq!(product_stock(&db, &gadget).await, 8);
    assert!(order_items(&db, &order).await.is_empty());

    let gone: Option<Order> = db.db.select(record_id("order", &order)).await.unwrap();
    assert!(gone.is_none());

    // The untouched order is untouched.
    assert_eq!(order_items(&db, &other).await.len(), 1);
    assert_order_consistent(&db, &other).await;
}

#[tokio::test]
async fn mixed_operation_sequence_conserves_the_invariant() {
    let (db, ledger) = ledger().await;
    let widget = seed_product(&db, "Widget", 20, 1.5).await;
    let gadget = seed_product(&db, "Gadget", 20, 7.0).await;
    let order = seed_order(&db, "Alice").await;

    let a = ledger.reserve_and_record(&widget, &order, 5).await.unwrap();
    let b = ledger.reserve_and_record(&gadget, &order, 2).await.unwrap();
    let a_key = a.id.unwrap().key().to_string();
    let b_key = b.id.unwrap().key().to_string();

    ledger.reconcile(&a_key, &gadget, &order, 4).await.unwrap();
    ledger.reconcile(&b_key, &gadget, &order, 1).await.unwrap();
    ledger.release(&a_key).await.unwrap();

    assert_order_consistent(&db, &order).await;
    // Units out in items plus units left in stock must equal the seeds.
    let held: i64 = order_items(&db, &order)
        .await
        .iter()
        .map(|it| it.quantity)
        .sum();
    let stock = product_stock(&db, &widget).await + product_stock(&db, &gadget).await;
    assert_eq!(held + stock, 40);
}
