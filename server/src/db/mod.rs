//! Database Module
//!
//! Embedded SurrealDB storage: connection bootstrap, schema definition and
//! per-entity repositories.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

const NAMESPACE: &str = "inventory";
const DATABASE: &str = "inventory";

/// Schema definition, applied at startup.
///
/// Tables stay schemaless (the repositories own the shapes); the indexes
/// enforce the uniqueness rules the API reports as 409s, as a backstop
/// behind the handler pre-checks.
const SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS category SCHEMALESS;
DEFINE INDEX IF NOT EXISTS idx_category_name ON TABLE category COLUMNS name UNIQUE;
DEFINE INDEX IF NOT EXISTS idx_category_slug ON TABLE category COLUMNS slug UNIQUE;

DEFINE TABLE IF NOT EXISTS product SCHEMALESS;
DEFINE INDEX IF NOT EXISTS idx_product_name ON TABLE product COLUMNS name UNIQUE;
DEFINE INDEX IF NOT EXISTS idx_product_slug ON TABLE product COLUMNS slug UNIQUE;
DEFINE INDEX IF NOT EXISTS idx_product_sku ON TABLE product COLUMNS sku UNIQUE;

DEFINE TABLE IF NOT EXISTS item SCHEMALESS;
DEFINE INDEX IF NOT EXISTS idx_item_order ON TABLE item COLUMNS order_id;

DEFINE TABLE IF NOT EXISTS `order` SCHEMALESS;
DEFINE TABLE IF NOT EXISTS sale SCHEMALESS;

DEFINE TABLE IF NOT EXISTS user SCHEMALESS;
DEFINE INDEX IF NOT EXISTS idx_user_username ON TABLE user COLUMNS username UNIQUE;
DEFINE INDEX IF NOT EXISTS idx_user_email ON TABLE user COLUMNS email UNIQUE;
"#;

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the embedded database at `db_path` and apply the
    /// schema.
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        apply_schema(&db).await?;

        tracing::info!(path = %db_path, "Database connection established (SurrealDB/RocksDB)");

        Ok(Self { db })
    }

    /// In-memory database for tests.
    #[cfg(test)]
    pub async fn memory() -> Result<Self, AppError> {
        use surrealdb::engine::local::Mem;

        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open memory database: {e}")))?;
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;
        apply_schema(&db).await?;
        Ok(Self { db })
    }
}

async fn apply_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(SCHEMA)
        .await
        .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?
        .check()
        .map_err(|e| AppError::database(format!("Schema definition rejected: {e}")))?;
    tracing::debug!("Database schema applied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::{CategoryRepository, RepoError};
    use shared::models::CategoryCreate;

    #[tokio::test]
    async fn opens_on_disk_database_and_applies_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db");
        let service = DbService::new(path.to_str().unwrap()).await.unwrap();

        // Schema application is idempotent: reopening must not fail.
        drop(service);
        DbService::new(path.to_str().unwrap()).await.unwrap();
    }

    #[tokio::test]
    async fn unique_index_rejects_duplicates() {
        let service = DbService::memory().await.unwrap();
        let categories = CategoryRepository::new(service.db.clone());

        categories
            .create(CategoryCreate {
                name: "Drinks".into(),
                slug: "drinks".into(),
            })
            .await
            .unwrap();

        let err = categories
            .create(CategoryCreate {
                name: "Drinks".into(),
                slug: "drinks-2".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }
}
