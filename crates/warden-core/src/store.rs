// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Store traits over the relational backend.
//!
//! The relational store is an external collaborator; Warden consumes it
//! through these narrow async traits. Implementations must make every
//! mutating method atomic: it either commits fully or reports a
//! `StoreError` with no partial effect visible to other callers. Multi-step
//! read-modify-write sequences ("role must exist, then replace its
//! permission set") are therefore expressed as single trait methods rather
//! than composed at the call site.
//!
//! Concurrent mutations of the same entity are resolved by the backend's
//! native isolation: last-committer-wins at the row level is accepted and
//! documented behavior.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::types::{
    NewPermission, NewRole, NewUser, Permission, PermissionPatch, Role, RolePatch, User,
};

// =============================================================================
// UserStore
// =============================================================================

/// Store operations on user accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Creates a user. Fails with `AlreadyExists` on a duplicate username.
    async fn create_user(&self, new: NewUser) -> StoreResult<User>;

    /// Returns the user with the given ID, or `None`.
    async fn get_user(&self, id: i64) -> StoreResult<Option<User>>;

    /// Returns the user with the given username, or `None`.
    async fn get_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    /// Replaces the user's entire role set (replace-set, not additive).
    ///
    /// Role IDs that do not exist are dropped silently. Fails with
    /// `NotFound` if the user does not exist.
    async fn set_user_roles(&self, user_id: i64, role_ids: Vec<i64>) -> StoreResult<User>;

    /// Replaces the user's credential hash.
    async fn set_password_hash(&self, user_id: i64, password_hash: String) -> StoreResult<()>;
}

// =============================================================================
// RbacStore
// =============================================================================

/// Store operations on roles and permissions.
#[async_trait]
pub trait RbacStore: Send + Sync {
    // =========================================================================
    // Roles
    // =========================================================================

    /// Creates a role. Fails with `AlreadyExists` on a duplicate name.
    ///
    /// Unknown permission IDs in the payload are dropped silently.
    async fn create_role(&self, new: NewRole) -> StoreResult<Role>;

    /// Returns the role with the given ID, or `None`.
    async fn get_role(&self, id: i64) -> StoreResult<Option<Role>>;

    /// Lists roles ordered by ID, paginated by `(skip, limit)`.
    async fn list_roles(&self, skip: u32, limit: u32) -> StoreResult<Vec<Role>>;

    /// Applies a partial update to a role.
    ///
    /// A present `permission_ids` replaces the role's permission set
    /// wholesale. Fails with `NotFound` if the role does not exist.
    async fn update_role(&self, id: i64, patch: RolePatch) -> StoreResult<Role>;

    /// Deletes a role. Fails with `NotFound` if it does not exist.
    async fn delete_role(&self, id: i64) -> StoreResult<()>;

    // =========================================================================
    // Permissions
    // =========================================================================

    /// Creates a permission. Fails with `AlreadyExists` on a duplicate name.
    async fn create_permission(&self, new: NewPermission) -> StoreResult<Permission>;

    /// Returns the permission with the given ID, or `None`.
    async fn get_permission(&self, id: i64) -> StoreResult<Option<Permission>>;

    /// Lists permissions ordered by ID, paginated by `(skip, limit)`.
    async fn list_permissions(&self, skip: u32, limit: u32) -> StoreResult<Vec<Permission>>;

    /// Applies a partial update to a permission.
    async fn update_permission(&self, id: i64, patch: PermissionPatch) -> StoreResult<Permission>;

    /// Deletes a permission. Fails with `NotFound` if it does not exist.
    async fn delete_permission(&self, id: i64) -> StoreResult<()>;

    // =========================================================================
    // Resolution support
    // =========================================================================

    /// Returns every permission granted by any of the given roles.
    async fn permissions_for_roles(&self, role_ids: &[i64]) -> StoreResult<Vec<Permission>>;
}
