//! Shared types for the inventory backend
//!
//! Common types used by the server and by API clients: entity models,
//! request payloads and the unified response envelope.

pub mod models;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::*;
pub use response::ApiResponse;
