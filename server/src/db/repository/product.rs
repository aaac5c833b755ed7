//! Product Repository
//!
//! CRUD for products. `stock_qty` is written here only at creation time
//! (the initial baseline); every later stock mutation is a ledger
//! transaction.

use chrono::Utc;
use shared::models::{ProductCreate, ProductUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::{LowStockProduct, Product};

const TABLE: &str = "product";

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All products, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(products)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let product: Option<Product> = self.base.db().select(record_id(TABLE, id)).await?;
        Ok(product)
    }

    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<Product>> {
        self.find_by_field("name", name).await
    }

    pub async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Product>> {
        self.find_by_field("slug", slug).await
    }

    pub async fn find_by_sku(&self, sku: &str) -> RepoResult<Option<Product>> {
        self.find_by_field("sku", sku).await
    }

    async fn find_by_field(&self, field: &'static str, value: &str) -> RepoResult<Option<Product>> {
        let found: Vec<Product> = self
            .base
            .db()
            .query(format!("SELECT * FROM product WHERE {field} = $value"))
            .bind(("value", value.to_string()))
            .await?
            .take(0)?;
        Ok(found.into_iter().next())
    }

    /// Products at or below their alert threshold
    pub async fn find_low_stock(&self) -> RepoResult<Vec<LowStockProduct>> {
        let products: Vec<LowStockProduct> = self
            .base
            .db()
            .query("SELECT id, name, sku, stock_qty FROM product WHERE stock_qty <= alert_qty")
            .await?
            .take(0)?;
        Ok(products)
    }

    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        if data.stock_qty < 0 {
            return Err(RepoError::Validation(
                "stock_qty must not be negative".into(),
            ));
        }

        let now = Utc::now();
        let product = Product {
            id: None,
            name: data.name,
            description: data.description,
            slug: data.slug,
            sku: data.sku,
            category_id: data
                .category_id
                .as_deref()
                .map(|id| record_id("category", id)),
            stock_qty: data.stock_qty,
            alert_qty: data.alert_qty,
            buying_price: data.buying_price,
            selling_price: data.selling_price,
            supplier_name: data.supplier_name,
            supplier_contact: data.supplier_contact,
            created_at: now,
            updated_at: now,
        };

        let created: Option<Product> = self.base.db().create(TABLE).content(product).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Update descriptive fields. Deliberately leaves `stock_qty` untouched.
    pub async fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        let mut product = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Product {id}")))?;

        if let Some(name) = data.name {
            product.name = name;
        }
        if let Some(description) = data.description {
            product.description = Some(description);
        }
        if let Some(slug) = data.slug {
            product.slug = slug;
        }
        if let Some(sku) = data.sku {
            product.sku = sku;
        }
        if let Some(category_id) = data.category_id {
            product.category_id = Some(record_id("category", &category_id));
        }
        if let Some(alert_qty) = data.alert_qty {
            product.alert_qty = alert_qty;
        }
        if let Some(buying_price) = data.buying_price {
            product.buying_price = buying_price;
        }
        if let Some(selling_price) = data.selling_price {
            product.selling_price = selling_price;
        }
        if let Some(supplier_name) = data.supplier_name {
            product.supplier_name = Some(supplier_name);
        }
        if let Some(supplier_contact) = data.supplier_contact {
            product.supplier_contact = Some(supplier_contact);
        }
        product.updated_at = Utc::now();

        let updated: Option<Product> = self
            .base
            .db()
            .update(record_id(TABLE, id))
            .content(product)
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Product {id}")))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let deleted: Option<Product> = self.base.db().delete(record_id(TABLE, id)).await?;
        Ok(deleted.is_some())
    }
}
