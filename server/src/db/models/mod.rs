//! Storage models
//!
//! Database-facing entity structs. IDs and references are [`RecordId`]s;
//! conversion into the string-id API models from `shared` happens at the
//! handler boundary.
//!
//! Timestamps are always set application-side (`Utc::now()`), never inside
//! queries, so they round-trip through serde unchanged.

pub mod category;
pub mod item;
pub mod order;
pub mod product;
pub mod sale;
pub mod user;

// Re-exports
pub use category::*;
pub use item::*;
pub use order::*;
pub use product::*;
pub use sale::*;
pub use user::*;
