//! Auth API Handlers

use axum::{Json, extract::State};
use shared::ApiResponse;
use shared::models::{LoginRequest, LoginResponse, User as SharedUser};

use crate::auth::{CurrentUser, verify_password};
use crate::core::ServerState;
use crate::utils::{AppError, AppResult, ok};

/// POST /api/auth/login - exchange credentials for a bearer token
///
/// Accepts either username or email. Every failure path returns the same
/// invalid-credentials message so usernames cannot be enumerated.
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    if payload.username.is_none() && payload.email.is_none() {
        return Err(AppError::validation("username or email is required"));
    }
    if payload.password.is_empty() {
        return Err(AppError::invalid_credentials());
    }

    let user = state
        .users()
        .find_by_username_or_email(payload.username.as_deref(), payload.email.as_deref())
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    if !verify_password(&payload.password, &user.password_hash) {
        tracing::warn!(username = %user.username, "Failed login attempt");
        return Err(AppError::invalid_credentials());
    }

    let shared: SharedUser = user.into();
    let token = state
        .jwt()
        .generate_token(&shared.id, &shared.username, shared.role)
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;

    tracing::info!(username = %shared.username, "User logged in");
    Ok(ok(LoginResponse {
        token,
        user: shared,
    }))
}

/// POST /api/auth/logout
///
/// Tokens are stateless; the client discards its copy. This endpoint
/// exists so clients have a uniform logout call.
pub async fn logout(user: CurrentUser) -> Json<ApiResponse<()>> {
    tracing::info!(username = %user.username, "User logged out");
    Json(ApiResponse::ok_with_message((), "Logged out"))
}

/// GET /api/auth/me - the authenticated user's own record
pub async fn me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<SharedUser>>> {
    let record = state
        .users()
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| AppError::not_found("User no longer exists"))?;
    Ok(ok(record.into()))
}
