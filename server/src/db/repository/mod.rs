//! Repository Module
//!
//! CRUD access to the SurrealDB tables. Cross-entity mutations (stock,
//! order totals, items) do NOT live here — they are ledger transactions.

pub mod category;
pub mod item;
pub mod order;
pub mod product;
pub mod sale;
pub mod user;

// Re-exports
pub use category::CategoryRepository;
pub use item::ItemRepository;
pub use order::OrderRepository;
pub use product::ProductRepository;
pub use sale::SaleRepository;
pub use user::UserRepository;

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let msg = err.to_string();
        // Unique index violations surface as "index ... already contains"
        if msg.contains("already contains") {
            RepoError::Duplicate(msg)
        } else {
            RepoError::Database(msg)
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: "table:key" strings at the API boundary, RecordId inside
// =============================================================================

/// Build a [`RecordId`] from an API-supplied id, accepting both the bare
/// key and the full `table:key` form (including a bracket-escaped key).
pub fn record_id(table: &str, id: &str) -> RecordId {
    let key = match id.split_once(':') {
        Some((tb, key)) if tb == table => key,
        _ => id,
    };
    let key = key.trim_start_matches('⟨').trim_end_matches('⟩');
    RecordId::from_table_key(table, key)
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_accepts_both_forms() {
        let a = record_id("product", "abc123");
        let b = record_id("product", "product:abc123");
        assert_eq!(a, b);
        assert_eq!(a.table(), "product");
    }

    #[test]
    fn record_id_strips_bracket_escapes() {
        let a = record_id("item", "item:⟨9f8e⟩");
        assert_eq!(a, record_id("item", "9f8e"));
    }
}
