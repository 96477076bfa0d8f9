// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Role administration handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use warden_core::{registry::perms, NewRole, Role, RolePatch};

use crate::error::ApiResult;
use crate::extractors::{Auth, Pagination};
use crate::response::RoleResponse;
use crate::state::AppState;

// =============================================================================
// Request bodies
// =============================================================================

/// Role creation request body.
#[derive(Debug, Deserialize)]
pub struct CreateRoleRequest {
    /// Role name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Permission IDs to grant. Unknown IDs are ignored.
    #[serde(default)]
    pub permission_ids: Vec<i64>,
}

/// Role update request body. Absent fields are left untouched.
#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// Replacement permission set.
    pub permission_ids: Option<Vec<i64>>,
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /api/v1/roles
pub async fn list_roles(
    State(state): State<AppState>,
    Auth(user): Auth,
    Pagination(page): Pagination,
) -> ApiResult<impl IntoResponse> {
    state.authz().require(&user, &[perms::ROLE_READ]).await?;

    let roles = state.rbac().list_roles(page.skip, page.limit()).await?;

    let mut out = Vec::with_capacity(roles.len());
    for role in roles {
        out.push(to_response(&state, role).await?);
    }
    Ok(Json(out))
}

/// POST /api/v1/roles
pub async fn create_role(
    State(state): State<AppState>,
    Auth(user): Auth,
    Json(request): Json<CreateRoleRequest>,
) -> ApiResult<impl IntoResponse> {
    state.authz().require(&user, &[perms::ROLE_CREATE]).await?;

    let mut new = NewRole::new(request.name).with_permissions(request.permission_ids);
    new.description = request.description;

    let role = state.rbac().create_role(new).await?;
    let response = to_response(&state, role).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/v1/roles/{role_id}
pub async fn get_role(
    State(state): State<AppState>,
    Auth(user): Auth,
    Path(role_id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    state.authz().require(&user, &[perms::ROLE_READ]).await?;

    let role = state.rbac().get_role(role_id).await?;
    Ok(Json(to_response(&state, role).await?))
}

/// PATCH /api/v1/roles/{role_id}
pub async fn update_role(
    State(state): State<AppState>,
    Auth(user): Auth,
    Path(role_id): Path<i64>,
    Json(request): Json<UpdateRoleRequest>,
) -> ApiResult<impl IntoResponse> {
    state.authz().require(&user, &[perms::ROLE_UPDATE]).await?;

    let patch = RolePatch {
        name: request.name,
        description: request.description,
        permission_ids: request.permission_ids,
    };

    let role = state.rbac().update_role(role_id, patch).await?;
    Ok(Json(to_response(&state, role).await?))
}

/// DELETE /api/v1/roles/{role_id}
pub async fn delete_role(
    State(state): State<AppState>,
    Auth(user): Auth,
    Path(role_id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    state.authz().require(&user, &[perms::ROLE_DELETE]).await?;

    state.rbac().delete_role(role_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn to_response(state: &AppState, role: Role) -> ApiResult<RoleResponse> {
    let permissions = state.rbac().role_permissions(role.id).await?;
    Ok(RoleResponse::new(role, permissions))
}
