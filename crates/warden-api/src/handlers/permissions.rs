// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Permission administration handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use warden_core::{registry::perms, NewPermission, PermissionPatch};

use crate::error::ApiResult;
use crate::extractors::{Auth, Pagination};
use crate::response::PermissionResponse;
use crate::state::AppState;

// =============================================================================
// Request bodies
// =============================================================================

/// Permission creation request body.
#[derive(Debug, Deserialize)]
pub struct CreatePermissionRequest {
    /// Permission name, `resource:action`.
    pub name: String,
    /// Description.
    pub description: Option<String>,
}

/// Permission update request body. Absent fields are left untouched.
#[derive(Debug, Deserialize)]
pub struct UpdatePermissionRequest {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /api/v1/permissions
pub async fn list_permissions(
    State(state): State<AppState>,
    Auth(user): Auth,
    Pagination(page): Pagination,
) -> ApiResult<impl IntoResponse> {
    state
        .authz()
        .require(&user, &[perms::PERMISSION_READ])
        .await?;

    let permissions = state
        .rbac()
        .list_permissions(page.skip, page.limit())
        .await?;
    let out: Vec<PermissionResponse> = permissions.into_iter().map(Into::into).collect();

    Ok(Json(out))
}

/// POST /api/v1/permissions
pub async fn create_permission(
    State(state): State<AppState>,
    Auth(user): Auth,
    Json(request): Json<CreatePermissionRequest>,
) -> ApiResult<impl IntoResponse> {
    state
        .authz()
        .require(&user, &[perms::PERMISSION_CREATE])
        .await?;

    let mut new = NewPermission::new(request.name);
    new.description = request.description;

    let permission = state.rbac().create_permission(new).await?;

    Ok((
        StatusCode::CREATED,
        Json(PermissionResponse::from(permission)),
    ))
}

/// GET /api/v1/permissions/{permission_id}
pub async fn get_permission(
    State(state): State<AppState>,
    Auth(user): Auth,
    Path(permission_id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    state
        .authz()
        .require(&user, &[perms::PERMISSION_READ])
        .await?;

    let permission = state.rbac().get_permission(permission_id).await?;
    Ok(Json(PermissionResponse::from(permission)))
}

/// PATCH /api/v1/permissions/{permission_id}
pub async fn update_permission(
    State(state): State<AppState>,
    Auth(user): Auth,
    Path(permission_id): Path<i64>,
    Json(request): Json<UpdatePermissionRequest>,
) -> ApiResult<impl IntoResponse> {
    state
        .authz()
        .require(&user, &[perms::PERMISSION_UPDATE])
        .await?;

    let patch = PermissionPatch {
        name: request.name,
        description: request.description,
    };

    let permission = state.rbac().update_permission(permission_id, patch).await?;
    Ok(Json(PermissionResponse::from(permission)))
}

/// DELETE /api/v1/permissions/{permission_id}
pub async fn delete_permission(
    State(state): State<AppState>,
    Auth(user): Auth,
    Path(permission_id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    state
        .authz()
        .require(&user, &[perms::PERMISSION_DELETE])
        .await?;

    state.rbac().delete_permission(permission_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
