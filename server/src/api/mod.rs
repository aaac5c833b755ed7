//! API routes
//!
//! One module per resource, each exposing a `router()` nested under its
//! `/api/...` prefix:
//!
//! - [`health`] - liveness probe
//! - [`auth`] - login and current-user introspection
//! - [`users`] - user management (admin only)
//! - [`categories`] - category management
//! - [`products`] - product management
//! - [`items`] - line items (all mutations go through the ledger)
//! - [`orders`] - order management
//! - [`sales`] - recorded sales
//! - [`notifications`] - low-stock notification stream

pub mod auth;
pub mod categories;
pub mod health;
pub mod items;
pub mod notifications;
pub mod orders;
pub mod products;
pub mod sales;
pub mod users;

use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Assemble the application router: all resource routers behind the auth
/// middleware, with CORS and request tracing outermost.
pub fn create_router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(users::router())
        .merge(categories::router())
        .merge(products::router())
        .merge(items::router())
        .merge(orders::router())
        .merge(sales::router())
        .merge(notifications::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            crate::auth::require_auth,
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
