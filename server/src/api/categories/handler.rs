//! Category API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::ApiResponse;
use shared::models::{Category as SharedCategory, CategoryCreate, CategoryUpdate};

use crate::core::ServerState;
use crate::utils::validation::{MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_required_text};
use crate::utils::{AppError, AppResult, ok};

/// GET /api/categories
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<SharedCategory>>>> {
    let categories = state.categories().find_all().await?;
    Ok(Json(ApiResponse::ok_list(
        categories.into_iter().map(Into::into).collect(),
    )))
}

/// GET /api/categories/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<SharedCategory>>> {
    let category = state
        .categories()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Category {id} not found")))?;
    Ok(ok(category.into()))
}

/// POST /api/categories
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<Json<ApiResponse<SharedCategory>>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.slug, "slug", MAX_SHORT_TEXT_LEN)?;

    let categories = state.categories();
    if categories.find_by_name(&payload.name).await?.is_some() {
        return Err(AppError::conflict(format!(
            "Category {} already exists",
            payload.name
        )));
    }
    if categories.find_by_slug(&payload.slug).await?.is_some() {
        return Err(AppError::conflict(format!(
            "Slug {} is already in use",
            payload.slug
        )));
    }

    let created = categories.create(payload).await?;
    Ok(ok(created.into()))
}

/// PUT /api/categories/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CategoryUpdate>,
) -> AppResult<Json<ApiResponse<SharedCategory>>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(slug) = &payload.slug {
        validate_required_text(slug, "slug", MAX_SHORT_TEXT_LEN)?;
    }

    let updated = state.categories().update(&id, payload).await?;
    Ok(ok(updated.into()))
}

/// DELETE /api/categories/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let deleted = state.categories().delete(&id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Category {id} not found")));
    }
    Ok(ok(true))
}
