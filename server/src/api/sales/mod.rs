//! Sale API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/sales", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/sales-person/{id}", get(handler::list_by_sales_person))
        .route("/{id}", get(handler::get_by_id).put(handler::update))
}
