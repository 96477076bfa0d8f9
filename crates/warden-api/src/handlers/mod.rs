// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! HTTP request handlers.

mod auth;
mod health;
mod permissions;
mod roles;
mod users;

pub use auth::{login, register, test_token, LoginRequest, RegisterRequest};
pub use health::health;
pub use permissions::{
    create_permission, delete_permission, get_permission, list_permissions, update_permission,
    CreatePermissionRequest, UpdatePermissionRequest,
};
pub use roles::{
    create_role, delete_role, get_role, list_roles, update_role, CreateRoleRequest,
    UpdateRoleRequest,
};
pub use users::{assign_user_roles, AssignRolesRequest};
