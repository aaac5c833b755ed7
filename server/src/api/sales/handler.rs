//! Sale API Handlers
//!
//! A sale snapshots the referenced order at recording time: its total
//! and salesperson are copied, not looked up again later.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use shared::ApiResponse;
use shared::models::{Sale as SharedSale, SaleCreate, SaleUpdate};

use crate::core::ServerState;
use crate::db::models::Order;
use crate::db::repository::sale::SaleWrite;
use crate::utils::{AppError, AppResult, ok};

/// GET /api/sales
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<SharedSale>>>> {
    let sales = state.sales().find_all().await?;
    Ok(Json(ApiResponse::ok_list(
        sales.into_iter().map(Into::into).collect(),
    )))
}

/// GET /api/sales/sales-person/{id}
pub async fn list_by_sales_person(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<SharedSale>>>> {
    let sales = state.sales().find_by_sales_person(&id).await?;
    Ok(Json(ApiResponse::ok_list(
        sales.into_iter().map(Into::into).collect(),
    )))
}

/// GET /api/sales/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<SharedSale>>> {
    let sale = state
        .sales()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Sale {id} not found")))?;
    Ok(ok(sale.into()))
}

/// POST /api/sales - record a sale against an order
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<SaleCreate>,
) -> AppResult<Json<ApiResponse<SharedSale>>> {
    let order = load_order(&state, &payload.order_id).await?;
    let write = SaleWrite {
        order_id: order.id.clone().ok_or_else(|| {
            AppError::internal("Order record is missing its id".to_string())
        })?,
        sales_person_id: order.sales_person_id.clone(),
        date_of_sale: payload.date_of_sale,
        total_amount: order.total_price,
        status: payload.status,
        payment_method: payload.payment_method,
    };

    let created = state.sales().create(write).await?;
    tracing::info!(order = %payload.order_id, total = order.total_price, "Sale recorded");
    Ok(ok(created.into()))
}

/// PUT /api/sales/{id} - re-point the sale and refresh its snapshot
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<SaleUpdate>,
) -> AppResult<Json<ApiResponse<SharedSale>>> {
    let existing = state
        .sales()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Sale {id} not found")))?;

    let order = load_order(&state, &payload.order_id).await?;
    let write = SaleWrite {
        order_id: order.id.clone().ok_or_else(|| {
            AppError::internal("Order record is missing its id".to_string())
        })?,
        sales_person_id: order.sales_person_id.clone(),
        date_of_sale: payload.date_of_sale.unwrap_or(existing.date_of_sale),
        total_amount: order.total_price,
        status: payload.status.unwrap_or(existing.status),
        payment_method: payload.payment_method.unwrap_or(existing.payment_method),
    };

    let updated = state.sales().update(&id, write).await?;
    Ok(ok(updated.into()))
}

async fn load_order(state: &ServerState, order_id: &str) -> Result<Order, AppError> {
    state
        .orders()
        .find_by_id(order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {order_id} not found")))
}
