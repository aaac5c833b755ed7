//! Data models
//!
//! Shared between the server and API clients. All IDs are strings in the
//! `table:key` form used by the storage layer.

pub mod category;
pub mod item;
pub mod notification;
pub mod order;
pub mod product;
pub mod sale;
pub mod user;

// Re-exports
pub use category::*;
pub use item::*;
pub use notification::*;
pub use order::*;
pub use product::*;
pub use sale::*;
pub use user::*;
