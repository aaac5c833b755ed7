//! Item API Handlers
//!
//! Thin shims over the inventory ledger: validate the payload shape,
//! call the matching ledger operation, shape the response.

use axum::{
    Json,
    extract::{Path, State},
};
use shared::ApiResponse;
use shared::models::{Item as SharedItem, ItemCreate, ItemUpdate};

use crate::core::ServerState;
use crate::utils::validation::validate_positive_quantity;
use crate::utils::{AppError, AppResult, ok};

/// GET /api/items
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<SharedItem>>>> {
    let items = state.items().find_all().await?;
    Ok(Json(ApiResponse::ok_list(
        items.into_iter().map(Into::into).collect(),
    )))
}

/// GET /api/items/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<SharedItem>>> {
    let item = state
        .items()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Item {id} not found")))?;
    Ok(ok(item.into()))
}

/// POST /api/items - reserve stock and record the line item
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ItemCreate>,
) -> AppResult<Json<ApiResponse<SharedItem>>> {
    validate_positive_quantity(payload.quantity, "quantity")?;

    let item = state
        .ledger()
        .reserve_and_record(&payload.product_id, &payload.order_id, payload.quantity)
        .await?;
    Ok(ok(item.into()))
}

/// PUT /api/items/{id} - reconcile the item to the given product, order
/// and quantity
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ItemUpdate>,
) -> AppResult<Json<ApiResponse<SharedItem>>> {
    validate_positive_quantity(payload.quantity, "quantity")?;

    let item = state
        .ledger()
        .reconcile(&id, &payload.product_id, &payload.order_id, payload.quantity)
        .await?;
    Ok(ok(item.into()))
}

/// DELETE /api/items/{id} - release the reservation
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<bool>>> {
    state.ledger().release(&id).await?;
    Ok(ok(true))
}
