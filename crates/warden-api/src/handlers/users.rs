// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! User administration handlers.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use warden_core::registry::perms;

use crate::error::ApiResult;
use crate::extractors::Auth;
use crate::response::UserResponse;
use crate::state::AppState;

/// Role assignment request body.
#[derive(Debug, Deserialize)]
pub struct AssignRolesRequest {
    /// Replacement role set. Unknown IDs are ignored.
    pub role_ids: Vec<i64>,
}

/// POST /api/v1/users/{user_id}/roles
///
/// Replaces the target user's role set.
pub async fn assign_user_roles(
    State(state): State<AppState>,
    Auth(user): Auth,
    Path(user_id): Path<i64>,
    Json(request): Json<AssignRolesRequest>,
) -> ApiResult<impl IntoResponse> {
    state.authz().require(&user, &[perms::USER_UPDATE]).await?;

    let updated = state
        .rbac()
        .assign_user_roles(user_id, request.role_ids)
        .await?;

    Ok(Json(UserResponse::from(updated)))
}
