// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! In-memory store implementation.
//!
//! This module provides a thread-safe, in-memory store that implements
//! both `UserStore` and `RbacStore`. It is the reference backend for tests
//! and development; a SQL backend would map each trait method to one
//! transaction.
//!
//! # Atomicity
//!
//! Every mutating method takes the single write lock for its whole
//! read-modify-write sequence, so callers observe either the full effect
//! of an operation or none of it.
//!
//! # Example
//!
//! ```rust,ignore
//! use warden_core::{MemoryStore, NewRole, RbacStore};
//!
//! let store = MemoryStore::new();
//! let role = store.create_role(NewRole::new("editor")).await?;
//! assert_eq!(role.name, "editor");
//! ```

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use crate::error::{EntityKind, StoreError, StoreResult};
use crate::store::{RbacStore, UserStore};
use crate::types::{
    NewPermission, NewRole, NewUser, Permission, PermissionPatch, Role, RolePatch, User,
};

// =============================================================================
// Inner state
// =============================================================================

#[derive(Debug, Default)]
struct Inner {
    users: BTreeMap<i64, User>,
    roles: BTreeMap<i64, Role>,
    permissions: BTreeMap<i64, Permission>,
    next_id: i64,
}

impl Inner {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    /// Keeps only permission IDs that exist, preserving payload order.
    fn existing_permission_ids(&self, ids: &[i64]) -> Vec<i64> {
        ids.iter()
            .copied()
            .filter(|id| self.permissions.contains_key(id))
            .collect()
    }

    /// Keeps only role IDs that exist, preserving payload order.
    fn existing_role_ids(&self, ids: &[i64]) -> Vec<i64> {
        ids.iter()
            .copied()
            .filter(|id| self.roles.contains_key(id))
            .collect()
    }
}

// =============================================================================
// MemoryStore
// =============================================================================

/// A thread-safe in-memory entity store.
///
/// # Thread Safety
///
/// This struct is `Send + Sync`. All state is protected by a single
/// `parking_lot::RwLock`; reads take the shared lock, mutations take the
/// exclusive lock for their entire sequence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of users currently stored.
    pub fn user_count(&self) -> usize {
        self.inner.read().users.len()
    }

    /// Returns the number of roles currently stored.
    pub fn role_count(&self) -> usize {
        self.inner.read().roles.len()
    }

    /// Returns the number of permissions currently stored.
    pub fn permission_count(&self) -> usize {
        self.inner.read().permissions.len()
    }
}

// =============================================================================
// UserStore implementation
// =============================================================================

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, new: NewUser) -> StoreResult<User> {
        let mut inner = self.inner.write();

        if inner.users.values().any(|u| u.username == new.username) {
            return Err(StoreError::already_exists(EntityKind::User));
        }

        let id = inner.allocate_id();
        let user = User {
            id,
            username: new.username,
            email: new.email,
            full_name: new.full_name,
            password_hash: new.password_hash,
            is_active: true,
            is_superuser: new.is_superuser,
            role_ids: Vec::new(),
        };

        inner.users.insert(id, user.clone());
        debug!(user_id = id, username = %user.username, "User created");
        Ok(user)
    }

    async fn get_user(&self, id: i64) -> StoreResult<Option<User>> {
        Ok(self.inner.read().users.get(&id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self
            .inner
            .read()
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn set_user_roles(&self, user_id: i64, role_ids: Vec<i64>) -> StoreResult<User> {
        let mut inner = self.inner.write();

        let kept = inner.existing_role_ids(&role_ids);
        let user = inner
            .users
            .get_mut(&user_id)
            .ok_or(StoreError::not_found(EntityKind::User))?;

        user.role_ids = kept;
        Ok(user.clone())
    }

    async fn set_password_hash(&self, user_id: i64, password_hash: String) -> StoreResult<()> {
        let mut inner = self.inner.write();

        let user = inner
            .users
            .get_mut(&user_id)
            .ok_or(StoreError::not_found(EntityKind::User))?;

        user.password_hash = password_hash;
        Ok(())
    }
}

// =============================================================================
// RbacStore implementation
// =============================================================================

#[async_trait]
impl RbacStore for MemoryStore {
    async fn create_role(&self, new: NewRole) -> StoreResult<Role> {
        let mut inner = self.inner.write();

        if inner.roles.values().any(|r| r.name == new.name) {
            return Err(StoreError::already_exists(EntityKind::Role));
        }

        let permission_ids = inner.existing_permission_ids(&new.permission_ids);
        let id = inner.allocate_id();
        let role = Role {
            id,
            name: new.name,
            description: new.description,
            permission_ids,
        };

        inner.roles.insert(id, role.clone());
        debug!(role_id = id, name = %role.name, "Role created");
        Ok(role)
    }

    async fn get_role(&self, id: i64) -> StoreResult<Option<Role>> {
        Ok(self.inner.read().roles.get(&id).cloned())
    }

    async fn list_roles(&self, skip: u32, limit: u32) -> StoreResult<Vec<Role>> {
        Ok(self
            .inner
            .read()
            .roles
            .values()
            .skip(skip as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn update_role(&self, id: i64, patch: RolePatch) -> StoreResult<Role> {
        let mut inner = self.inner.write();

        if let Some(name) = &patch.name {
            // Name uniqueness applies to every row but the one being patched.
            if inner.roles.values().any(|r| r.id != id && &r.name == name) {
                return Err(StoreError::already_exists(EntityKind::Role));
            }
        }

        let permission_ids = patch
            .permission_ids
            .as_ref()
            .map(|ids| inner.existing_permission_ids(ids));

        let role = inner
            .roles
            .get_mut(&id)
            .ok_or(StoreError::not_found(EntityKind::Role))?;

        if let Some(name) = patch.name {
            role.name = name;
        }
        if let Some(description) = patch.description {
            role.description = Some(description);
        }
        if let Some(ids) = permission_ids {
            role.permission_ids = ids;
        }

        Ok(role.clone())
    }

    async fn delete_role(&self, id: i64) -> StoreResult<()> {
        let mut inner = self.inner.write();

        if inner.roles.remove(&id).is_none() {
            return Err(StoreError::not_found(EntityKind::Role));
        }

        // Cascade: drop the role from every user's assignment set.
        for user in inner.users.values_mut() {
            user.role_ids.retain(|rid| *rid != id);
        }

        debug!(role_id = id, "Role deleted");
        Ok(())
    }

    async fn create_permission(&self, new: NewPermission) -> StoreResult<Permission> {
        let mut inner = self.inner.write();

        if inner.permissions.values().any(|p| p.name == new.name) {
            return Err(StoreError::already_exists(EntityKind::Permission));
        }

        let id = inner.allocate_id();
        let permission = Permission {
            id,
            name: new.name,
            description: new.description,
        };

        inner.permissions.insert(id, permission.clone());
        debug!(permission_id = id, name = %permission.name, "Permission created");
        Ok(permission)
    }

    async fn get_permission(&self, id: i64) -> StoreResult<Option<Permission>> {
        Ok(self.inner.read().permissions.get(&id).cloned())
    }

    async fn list_permissions(&self, skip: u32, limit: u32) -> StoreResult<Vec<Permission>> {
        Ok(self
            .inner
            .read()
            .permissions
            .values()
            .skip(skip as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn update_permission(&self, id: i64, patch: PermissionPatch) -> StoreResult<Permission> {
        let mut inner = self.inner.write();

        if let Some(name) = &patch.name {
            if inner
                .permissions
                .values()
                .any(|p| p.id != id && &p.name == name)
            {
                return Err(StoreError::already_exists(EntityKind::Permission));
            }
        }

        let permission = inner
            .permissions
            .get_mut(&id)
            .ok_or(StoreError::not_found(EntityKind::Permission))?;

        if let Some(name) = patch.name {
            permission.name = name;
        }
        if let Some(description) = patch.description {
            permission.description = Some(description);
        }

        Ok(permission.clone())
    }

    async fn delete_permission(&self, id: i64) -> StoreResult<()> {
        let mut inner = self.inner.write();

        if inner.permissions.remove(&id).is_none() {
            return Err(StoreError::not_found(EntityKind::Permission));
        }

        // Cascade: drop the permission from every role's grant set.
        for role in inner.roles.values_mut() {
            role.permission_ids.retain(|pid| *pid != id);
        }

        debug!(permission_id = id, "Permission deleted");
        Ok(())
    }

    async fn permissions_for_roles(&self, role_ids: &[i64]) -> StoreResult<Vec<Permission>> {
        let inner = self.inner.read();

        let mut seen = std::collections::HashSet::new();
        let mut result = Vec::new();

        for role_id in role_ids {
            let Some(role) = inner.roles.get(role_id) else {
                continue;
            };
            for pid in &role.permission_ids {
                if let Some(permission) = inner.permissions.get(pid) {
                    if seen.insert(*pid) {
                        result.push(permission.clone());
                    }
                }
            }
        }

        Ok(result)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_user_duplicate_username() {
        let store = MemoryStore::new();

        store
            .create_user(NewUser::new("alice", "hash"))
            .await
            .unwrap();

        let err = store
            .create_user(NewUser::new("alice", "hash2"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::AlreadyExists {
                kind: EntityKind::User
            }
        ));
        assert_eq!(store.user_count(), 1);
    }

    #[tokio::test]
    async fn test_role_crud() {
        let store = MemoryStore::new();

        let p1 = store
            .create_permission(NewPermission::new("doc:read"))
            .await
            .unwrap();
        let role = store
            .create_role(NewRole::new("editor").with_permissions(vec![p1.id, 9999]))
            .await
            .unwrap();

        // Unknown permission IDs are dropped silently.
        assert_eq!(role.permission_ids, vec![p1.id]);

        let patch = RolePatch {
            description: Some("Editors".to_string()),
            ..Default::default()
        };
        let updated = store.update_role(role.id, patch).await.unwrap();
        assert_eq!(updated.name, "editor");
        assert_eq!(updated.description.as_deref(), Some("Editors"));

        store.delete_role(role.id).await.unwrap();
        assert!(store.get_role(role.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_role() {
        let store = MemoryStore::new();
        let err = store.delete_role(42).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::NotFound {
                kind: EntityKind::Role
            }
        ));
    }

    #[tokio::test]
    async fn test_set_user_roles_replaces_set() {
        let store = MemoryStore::new();

        let user = store
            .create_user(NewUser::new("bob", "hash"))
            .await
            .unwrap();
        let r1 = store.create_role(NewRole::new("a")).await.unwrap();
        let r2 = store.create_role(NewRole::new("b")).await.unwrap();

        let user = store
            .set_user_roles(user.id, vec![r1.id])
            .await
            .unwrap();
        assert_eq!(user.role_ids, vec![r1.id]);

        // Replace-set semantics: the old assignment does not survive.
        let user = store
            .set_user_roles(user.id, vec![r2.id])
            .await
            .unwrap();
        assert_eq!(user.role_ids, vec![r2.id]);
    }

    #[tokio::test]
    async fn test_delete_role_cascades_to_users() {
        let store = MemoryStore::new();

        let user = store
            .create_user(NewUser::new("carol", "hash"))
            .await
            .unwrap();
        let role = store.create_role(NewRole::new("temp")).await.unwrap();
        store.set_user_roles(user.id, vec![role.id]).await.unwrap();

        store.delete_role(role.id).await.unwrap();

        let user = store.get_user(user.id).await.unwrap().unwrap();
        assert!(user.role_ids.is_empty());
    }

    #[tokio::test]
    async fn test_permissions_for_roles_deduplicates() {
        let store = MemoryStore::new();

        let p1 = store
            .create_permission(NewPermission::new("doc:read"))
            .await
            .unwrap();
        let p2 = store
            .create_permission(NewPermission::new("doc:write"))
            .await
            .unwrap();

        let r1 = store
            .create_role(NewRole::new("reader").with_permissions(vec![p1.id]))
            .await
            .unwrap();
        let r2 = store
            .create_role(NewRole::new("writer").with_permissions(vec![p1.id, p2.id]))
            .await
            .unwrap();

        let perms = store
            .permissions_for_roles(&[r1.id, r2.id])
            .await
            .unwrap();
        let names: Vec<_> = perms.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(perms.len(), 2);
        assert!(names.contains(&"doc:read"));
        assert!(names.contains(&"doc:write"));
    }

    #[tokio::test]
    async fn test_list_pagination() {
        let store = MemoryStore::new();

        for i in 0..5 {
            store
                .create_permission(NewPermission::new(format!("item:{i}")))
                .await
                .unwrap();
        }

        let page = store.list_permissions(2, 2).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].name, "item:2");
    }
}
