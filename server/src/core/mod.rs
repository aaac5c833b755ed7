//! Core Module
//!
//! Configuration, shared server state, the HTTP server lifecycle and
//! background task management.

pub mod config;
pub mod server;
pub mod state;
pub mod tasks;

pub use config::Config;
pub use server::Server;
pub use state::ServerState;
pub use tasks::{BackgroundTasks, TaskKind};
