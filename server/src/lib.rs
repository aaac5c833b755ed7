//! Inventory Server
//!
//! Inventory and sales backend built on an embedded SurrealDB store.
//!
//! # Module structure
//!
//! ```text
//! server/src/
//! ├── core/     # configuration, shared state, server lifecycle, tasks
//! ├── db/       # storage models and per-entity repositories
//! ├── ledger/   # atomic stock / item / order-total transactions
//! ├── alerts/   # low-stock scan and alert deduplication
//! ├── notify/   # subscriber fan-out for server-pushed notifications
//! ├── auth/     # JWT authentication, Argon2 password hashing
//! ├── api/      # HTTP routes and handlers
//! └── utils/    # errors, logging, validation
//! ```
//!
//! The invariant-bearing mutations (product stock, item quantities and
//! prices, order totals) all funnel through [`ledger::InventoryLedger`];
//! the rest of the API is conventional CRUD.

pub mod alerts;
pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod ledger;
pub mod notify;
pub mod utils;

pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use ledger::{InventoryLedger, LedgerError};
pub use utils::logger::{init_logger, init_logger_with_file};
pub use utils::{AppError, AppResult};
