// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Authentication handlers.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;

use crate::auth::Registration;
use crate::error::{ApiError, ApiResult};
use crate::extractors::Auth;
use crate::response::{TokenResponse, UserResponse};
use crate::state::AppState;

// =============================================================================
// Login
// =============================================================================

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

/// POST /api/v1/auth/login
///
/// Authenticates a user and returns a JWT token.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    if request.username.is_empty() || request.password.is_empty() {
        return Err(ApiError::bad_request("Username and password are required"));
    }

    let (token, expires_in) = state
        .auth()
        .login(&request.username, &request.password)
        .await?;

    Ok(Json(TokenResponse::new(token, expires_in)))
}

// =============================================================================
// Register
// =============================================================================

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Desired username.
    pub username: String,
    /// Password.
    pub password: String,
    /// Email address.
    pub email: Option<String>,
    /// Display name.
    pub full_name: Option<String>,
}

/// POST /api/v1/auth/register
///
/// Creates a new user account.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    let user = state
        .auth()
        .register(Registration {
            username: request.username,
            password: request.password,
            email: request.email,
            full_name: request.full_name,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

// =============================================================================
// Test Token
// =============================================================================

/// POST /api/v1/auth/test-token
///
/// Returns the user identified by the presented token. Useful for clients
/// to check that a stored token is still valid.
pub async fn test_token(Auth(user): Auth) -> ApiResult<impl IntoResponse> {
    Ok(Json(UserResponse::from(user)))
}
