//! User API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use shared::ApiResponse;
use shared::models::{User as SharedUser, UserCreate, UserUpdate};

use crate::auth::{CurrentUser, hash_password};
use crate::core::ServerState;
use crate::db::models::User;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_PASSWORD_LEN, validate_required_text,
};
use crate::utils::{AppError, AppResult, ok};

/// GET /api/users
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<SharedUser>>>> {
    let users = state.users().find_all().await?;
    Ok(Json(ApiResponse::ok_list(
        users.into_iter().map(Into::into).collect(),
    )))
}

/// GET /api/users/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<SharedUser>>> {
    let user = state
        .users()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
    Ok(ok(user.into()))
}

/// POST /api/users
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<ApiResponse<SharedUser>>> {
    validate_required_text(&payload.username, "username", MAX_NAME_LEN)?;
    validate_required_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    validate_required_text(&payload.password, "password", MAX_PASSWORD_LEN)?;
    validate_required_text(&payload.firstname, "firstname", MAX_NAME_LEN)?;
    validate_required_text(&payload.lastname, "lastname", MAX_NAME_LEN)?;

    let users = state.users();
    if users.find_by_username(&payload.username).await?.is_some() {
        return Err(AppError::conflict(format!(
            "Username {} is already taken",
            payload.username
        )));
    }
    if users.find_by_email(&payload.email).await?.is_some() {
        return Err(AppError::conflict(format!(
            "Email {} is already registered",
            payload.email
        )));
    }

    let now = Utc::now();
    let user = User {
        id: None,
        username: payload.username,
        firstname: payload.firstname,
        lastname: payload.lastname,
        email: payload.email,
        password_hash: hash_password(&payload.password)?,
        phone: payload.phone,
        role: payload.role,
        gender: payload.gender,
        date_of_birth: payload.date_of_birth,
        address: payload.address,
        image: payload.image,
        created_at: now,
        updated_at: now,
    };

    let created = users.create(user).await?;
    tracing::info!(username = %created.username, "User created");
    Ok(ok(created.into()))
}

/// PUT /api/users/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<ApiResponse<SharedUser>>> {
    let users = state.users();

    if let Some(username) = &payload.username
        && let Some(existing) = users.find_by_username(username).await?
        && existing.id.as_ref().map(|r| r.key().to_string()) != id_key(&id)
    {
        return Err(AppError::conflict(format!(
            "Username {username} is already taken"
        )));
    }
    if let Some(email) = &payload.email
        && let Some(existing) = users.find_by_email(email).await?
        && existing.id.as_ref().map(|r| r.key().to_string()) != id_key(&id)
    {
        return Err(AppError::conflict(format!(
            "Email {email} is already registered"
        )));
    }

    let updated = users.update(&id, payload).await?;
    Ok(ok(updated.into()))
}

/// DELETE /api/users/{id}
///
/// Admins cannot delete their own account.
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<bool>>> {
    if id_key(&user.id) == id_key(&id) {
        return Err(AppError::Invalid(
            "You cannot delete your own account".to_string(),
        ));
    }

    let deleted = state.users().delete(&id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("User {id} not found")));
    }
    tracing::info!(user = %id, "User deleted");
    Ok(ok(true))
}

/// Normalize an API-supplied id to its bare key for comparisons.
fn id_key(id: &str) -> Option<String> {
    let key = match id.split_once(':') {
        Some((_, key)) => key,
        None => id,
    };
    Some(key.trim_start_matches('⟨').trim_end_matches('⟩').to_string())
}
