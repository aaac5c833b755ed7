//! Product API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::ApiResponse;
use shared::models::{Product as SharedProduct, ProductCreate, ProductUpdate};

use crate::core::ServerState;
use crate::utils::validation::{
    MAX_DESCRIPTION_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_price,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, ok};

/// GET /api/products
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<SharedProduct>>>> {
    let products = state.products().find_all().await?;
    Ok(Json(ApiResponse::ok_list(
        products.into_iter().map(Into::into).collect(),
    )))
}

/// GET /api/products/low-stock - products at or below their threshold
pub async fn low_stock(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<SharedProduct>>>> {
    let products = state.products().find_all().await?;
    let low: Vec<SharedProduct> = products
        .into_iter()
        .filter(|p| p.stock_qty <= p.alert_qty)
        .map(Into::into)
        .collect();
    Ok(Json(ApiResponse::ok_list(low)))
}

/// GET /api/products/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<SharedProduct>>> {
    let product = state
        .products()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {id} not found")))?;
    Ok(ok(product.into()))
}

/// POST /api/products
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<ApiResponse<SharedProduct>>> {
    validate_payload_text(
        &payload.name,
        &payload.slug,
        &payload.sku,
        &payload.description,
    )?;
    validate_price(payload.buying_price, "buying_price")?;
    validate_price(payload.selling_price, "selling_price")?;
    if payload.stock_qty < 0 {
        return Err(AppError::validation("stock_qty must not be negative"));
    }
    if payload.alert_qty < 0 {
        return Err(AppError::validation("alert_qty must not be negative"));
    }

    let products = state.products();
    if products.find_by_name(&payload.name).await?.is_some() {
        return Err(AppError::conflict(format!(
            "Product {} already exists",
            payload.name
        )));
    }
    if products.find_by_slug(&payload.slug).await?.is_some() {
        return Err(AppError::conflict(format!(
            "Slug {} is already in use",
            payload.slug
        )));
    }
    if products.find_by_sku(&payload.sku).await?.is_some() {
        return Err(AppError::conflict(format!(
            "SKU {} is already in use",
            payload.sku
        )));
    }

    if let Some(category_id) = &payload.category_id
        && state.categories().find_by_id(category_id).await?.is_none()
    {
        return Err(AppError::not_found(format!(
            "Category {category_id} does not exist"
        )));
    }

    let created = products.create(payload).await?;
    tracing::info!(product = %created.name, "Product created");
    Ok(ok(created.into()))
}

/// PUT /api/products/{id}
///
/// Descriptive fields only. There is no stock field in the payload;
/// stock changes happen exclusively through item operations.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<ApiResponse<SharedProduct>>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(slug) = &payload.slug {
        validate_required_text(slug, "slug", MAX_SHORT_TEXT_LEN)?;
    }
    if let Some(sku) = &payload.sku {
        validate_required_text(sku, "sku", MAX_SHORT_TEXT_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_DESCRIPTION_LEN)?;
    if let Some(price) = payload.buying_price {
        validate_price(price, "buying_price")?;
    }
    if let Some(price) = payload.selling_price {
        validate_price(price, "selling_price")?;
    }
    if let Some(alert_qty) = payload.alert_qty
        && alert_qty < 0
    {
        return Err(AppError::validation("alert_qty must not be negative"));
    }

    if let Some(category_id) = &payload.category_id
        && state.categories().find_by_id(category_id).await?.is_none()
    {
        return Err(AppError::not_found(format!(
            "Category {category_id} does not exist"
        )));
    }

    let updated = state.products().update(&id, payload).await?;
    Ok(ok(updated.into()))
}

/// DELETE /api/products/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let deleted = state.products().delete(&id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Product {id} not found")));
    }
    tracing::info!(product = %id, "Product deleted");
    Ok(ok(true))
}

fn validate_payload_text(
    name: &str,
    slug: &str,
    sku: &str,
    description: &Option<String>,
) -> Result<(), AppError> {
    validate_required_text(name, "name", MAX_NAME_LEN)?;
    validate_required_text(slug, "slug", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(sku, "sku", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(description, "description", MAX_DESCRIPTION_LEN)
}
