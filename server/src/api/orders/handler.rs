//! Order API Handlers
//!
//! Order creation and descriptive updates are plain repository writes;
//! deletion goes through the ledger because it has to release every
//! attached item's stock.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::ApiResponse;
use shared::models::{Order as SharedOrder, OrderCreate, OrderUpdate};

use crate::core::ServerState;
use crate::db::repository::record_id;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ok};

const DEFAULT_PAGE_SIZE: u64 = 20;
const MAX_PAGE_SIZE: u64 = 100;

#[derive(Debug, Deserialize)]
pub struct Pagination {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

/// GET /api/orders?page=&limit= - paginated listing, newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<Vec<SharedOrder>>>> {
    let page = pagination.page.unwrap_or(1).max(1);
    let limit = pagination
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let orders = state.orders().find_page(page, limit).await?;
    Ok(Json(ApiResponse::ok_list(
        orders.into_iter().map(Into::into).collect(),
    )))
}

/// GET /api/orders/sales-person/{id} - one salesperson's orders
pub async fn list_by_sales_person(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<SharedOrder>>>> {
    let orders = state.orders().find_by_sales_person(&id).await?;
    Ok(Json(ApiResponse::ok_list(
        orders.into_iter().map(Into::into).collect(),
    )))
}

/// GET /api/orders/{id} - order detail with its items
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<SharedOrder>>> {
    let order = state
        .orders()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {id} not found")))?;

    let items = state.items().find_by_order(&record_id("order", &id)).await?;
    Ok(ok(order.into_shared(items)))
}

/// POST /api/orders - create an empty order
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<ApiResponse<SharedOrder>>> {
    validate_required_text(&payload.customer_name, "customer_name", MAX_NAME_LEN)?;
    validate_optional_text(
        &payload.customer_contact,
        "customer_contact",
        MAX_SHORT_TEXT_LEN,
    )?;

    if state
        .users()
        .find_by_id(&payload.sales_person_id)
        .await?
        .is_none()
    {
        return Err(AppError::not_found(format!(
            "Salesperson {} does not exist",
            payload.sales_person_id
        )));
    }

    let created = state.orders().create(payload).await?;
    Ok(ok(created.into()))
}

/// PUT /api/orders/{id} - descriptive fields only
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderUpdate>,
) -> AppResult<Json<ApiResponse<SharedOrder>>> {
    if let Some(customer_name) = &payload.customer_name {
        validate_required_text(customer_name, "customer_name", MAX_NAME_LEN)?;
    }
    validate_optional_text(
        &payload.customer_contact,
        "customer_contact",
        MAX_SHORT_TEXT_LEN,
    )?;

    if let Some(sales_person_id) = &payload.sales_person_id
        && state.users().find_by_id(sales_person_id).await?.is_none()
    {
        return Err(AppError::not_found(format!(
            "Salesperson {sales_person_id} does not exist"
        )));
    }

    let updated = state.orders().update(&id, payload).await?;
    Ok(ok(updated.into()))
}

/// DELETE /api/orders/{id} - delete the order and release every item it
/// holds
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<bool>>> {
    state.ledger().release_order(&id).await?;
    tracing::info!(order = %id, "Order deleted");
    Ok(ok(true))
}
