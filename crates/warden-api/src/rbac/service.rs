// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Role and permission administration.
//!
//! Reads go through the cache; writes hit the store first and invalidate
//! afterwards, so a failed write never evicts valid entries. Wildcard
//! patterns are deliberately broad: one role edit clears every role entry
//! and every user's resolved permission set, trading precision for the
//! guarantee that nothing stale survives.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use warden_cache::{CacheKey, CacheLayer};
use warden_core::{
    NewPermission, NewRole, Permission, PermissionPatch, RbacStore, Role, RolePatch, User,
    UserStore,
};

use crate::error::{ApiError, ApiResult};

// =============================================================================
// RbacService
// =============================================================================

/// CRUD over roles and permissions, plus user-role assignment.
#[derive(Clone)]
pub struct RbacService {
    store: Arc<dyn RbacStore>,
    user_store: Arc<dyn UserStore>,
    cache: CacheLayer,
    entity_ttl: Duration,
}

impl RbacService {
    /// Creates a new service.
    pub fn new(
        store: Arc<dyn RbacStore>,
        user_store: Arc<dyn UserStore>,
        cache: CacheLayer,
        entity_ttl: Duration,
    ) -> Self {
        Self {
            store,
            user_store,
            cache,
            entity_ttl,
        }
    }

    // =========================================================================
    // Roles
    // =========================================================================

    /// Lists roles, cached per (skip, limit) page.
    pub async fn list_roles(&self, skip: u32, limit: u32) -> ApiResult<Vec<Role>> {
        let key = CacheKey::new("roles").kwarg("skip", skip).kwarg("limit", limit);
        let store = self.store.clone();

        let roles: Vec<Role> = self
            .cache
            .get_or_compute(&key, self.entity_ttl, || async move {
                store.list_roles(skip, limit).await
            })
            .await
            .map_err(ApiError::from)?;

        Ok(roles)
    }

    /// Fetches a single role, cached per ID.
    pub async fn get_role(&self, id: i64) -> ApiResult<Role> {
        let key = CacheKey::new("role").arg(id);
        let store = self.store.clone();

        self.cache
            .get_or_compute(&key, self.entity_ttl, || async move {
                store
                    .get_role(id)
                    .await?
                    .ok_or_else(|| ApiError::not_found("Role"))
            })
            .await
    }

    /// Creates a role. Unknown permission IDs in the payload are dropped.
    pub async fn create_role(&self, new: NewRole) -> ApiResult<Role> {
        if new.name.trim().is_empty() {
            return Err(ApiError::validation("Role name must not be empty"));
        }

        let role = self.store.create_role(new).await?;

        self.invalidate_role_caches().await;

        info!(role_id = role.id, name = %role.name, "Role created");
        Ok(role)
    }

    /// Applies a partial update to a role.
    ///
    /// A present `permission_ids` replaces the role's grants, so every
    /// cached user permission set is invalidated along with the role pages.
    pub async fn update_role(&self, id: i64, patch: RolePatch) -> ApiResult<Role> {
        if patch.is_empty() {
            return self.get_role(id).await;
        }
        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(ApiError::validation("Role name must not be empty"));
            }
        }

        let role = self.store.update_role(id, patch).await?;

        self.invalidate_role_caches().await;

        info!(role_id = role.id, "Role updated");
        Ok(role)
    }

    /// Deletes a role. Users holding it lose the assignment.
    pub async fn delete_role(&self, id: i64) -> ApiResult<()> {
        self.store.delete_role(id).await?;

        self.invalidate_role_caches().await;

        info!(role_id = id, "Role deleted");
        Ok(())
    }

    /// Returns the permissions granted by a role.
    pub async fn role_permissions(&self, role_id: i64) -> ApiResult<Vec<Permission>> {
        Ok(self.store.permissions_for_roles(&[role_id]).await?)
    }

    // =========================================================================
    // Permissions
    // =========================================================================

    /// Lists permissions, cached per (skip, limit) page.
    pub async fn list_permissions(&self, skip: u32, limit: u32) -> ApiResult<Vec<Permission>> {
        let key = CacheKey::new("permissions")
            .kwarg("skip", skip)
            .kwarg("limit", limit);
        let store = self.store.clone();

        let permissions: Vec<Permission> = self
            .cache
            .get_or_compute(&key, self.entity_ttl, || async move {
                store.list_permissions(skip, limit).await
            })
            .await
            .map_err(ApiError::from)?;

        Ok(permissions)
    }

    /// Fetches a single permission, cached per ID.
    pub async fn get_permission(&self, id: i64) -> ApiResult<Permission> {
        let key = CacheKey::new("permission").arg(id);
        let store = self.store.clone();

        self.cache
            .get_or_compute(&key, self.entity_ttl, || async move {
                store
                    .get_permission(id)
                    .await?
                    .ok_or_else(|| ApiError::not_found("Permission"))
            })
            .await
    }

    /// Creates a permission. The name must follow `resource:action`.
    pub async fn create_permission(&self, new: NewPermission) -> ApiResult<Permission> {
        validate_permission_name(&new.name)?;

        let permission = self.store.create_permission(new).await?;

        self.invalidate_permission_caches().await;

        info!(permission_id = permission.id, name = %permission.name, "Permission created");
        Ok(permission)
    }

    /// Applies a partial update to a permission.
    ///
    /// A renamed permission changes what role grants mean, so role and
    /// user-permission caches are cleared too.
    pub async fn update_permission(&self, id: i64, patch: PermissionPatch) -> ApiResult<Permission> {
        if patch.is_empty() {
            return self.get_permission(id).await;
        }
        if let Some(name) = &patch.name {
            validate_permission_name(name)?;
        }

        let permission = self.store.update_permission(id, patch).await?;

        self.invalidate_permission_caches().await;

        info!(permission_id = permission.id, "Permission updated");
        Ok(permission)
    }

    /// Deletes a permission. Roles granting it lose the grant.
    pub async fn delete_permission(&self, id: i64) -> ApiResult<()> {
        self.store.delete_permission(id).await?;

        self.invalidate_permission_caches().await;

        info!(permission_id = id, "Permission deleted");
        Ok(())
    }

    // =========================================================================
    // User-role assignment
    // =========================================================================

    /// Replaces a user's role set. Unknown role IDs are dropped.
    ///
    /// Role and permission entities themselves are unchanged, so only the
    /// resolved user-permission namespace is invalidated.
    pub async fn assign_user_roles(&self, user_id: i64, role_ids: Vec<i64>) -> ApiResult<User> {
        let user = self.user_store.set_user_roles(user_id, role_ids).await?;

        self.cache.invalidate("user_permissions:*").await;

        info!(user_id = user.id, roles = ?user.role_ids, "User roles assigned");
        Ok(user)
    }

    // =========================================================================
    // Invalidation
    // =========================================================================

    async fn invalidate_role_caches(&self) {
        self.cache.invalidate("roles:*").await;
        self.cache.invalidate("role:*").await;
        self.cache.invalidate("user_permissions:*").await;
    }

    async fn invalidate_permission_caches(&self) {
        self.cache.invalidate("permissions:*").await;
        self.cache.invalidate("permission:*").await;
        self.invalidate_role_caches().await;
    }
}

/// Checks the `resource:action` naming convention.
fn validate_permission_name(name: &str) -> ApiResult<()> {
    match name.split_once(':') {
        Some((resource, action)) if !resource.is_empty() && !action.is_empty() => Ok(()),
        _ => Err(ApiError::validation(
            "Permission name must follow 'resource:action'",
        )),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use warden_cache::{CacheStore, MemoryCacheStore};
    use warden_core::{MemoryStore, NewUser};

    fn setup() -> (RbacService, Arc<MemoryStore>, Arc<MemoryCacheStore>) {
        let store = Arc::new(MemoryStore::new());
        let cache_store = Arc::new(MemoryCacheStore::new());
        let service = RbacService::new(
            store.clone(),
            store.clone(),
            CacheLayer::new(cache_store.clone()),
            Duration::from_secs(3600),
        );
        (service, store, cache_store)
    }

    #[tokio::test]
    async fn test_role_crud_roundtrip() {
        let (svc, _store, _cache) = setup();

        let role = svc
            .create_role(NewRole::new("editor").with_description("Editors"))
            .await
            .unwrap();

        let fetched = svc.get_role(role.id).await.unwrap();
        assert_eq!(fetched.name, "editor");

        let patch = RolePatch {
            name: Some("senior-editor".to_string()),
            ..Default::default()
        };
        let updated = svc.update_role(role.id, patch).await.unwrap();
        assert_eq!(updated.name, "senior-editor");

        svc.delete_role(role.id).await.unwrap();
        let err = svc.get_role(role.id).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_permission_name_validation() {
        let (svc, _store, _cache) = setup();

        assert!(svc
            .create_permission(NewPermission::new("doc:read"))
            .await
            .is_ok());

        for bad in ["docread", ":read", "doc:", ""] {
            let err = svc
                .create_permission(NewPermission::new(bad))
                .await
                .unwrap_err();
            assert!(matches!(err, ApiError::Validation { .. }), "{bad}");
        }
    }

    #[tokio::test]
    async fn test_list_roles_is_cached() {
        let (svc, store, cache) = setup();

        svc.create_role(NewRole::new("a")).await.unwrap();
        let first = svc.list_roles(0, 100).await.unwrap();
        assert_eq!(first.len(), 1);

        // Write behind the cache's back; the stale page is still served.
        store.create_role(NewRole::new("b")).await.unwrap();
        let second = svc.list_roles(0, 100).await.unwrap();
        assert_eq!(second.len(), 1);
        assert!(!cache.is_empty());
    }

    #[tokio::test]
    async fn test_role_update_invalidates_user_permissions() {
        let (svc, store, cache) = setup();

        let role = svc.create_role(NewRole::new("reader")).await.unwrap();
        let user = store.create_user(NewUser::new("alice", "h")).await.unwrap();
        svc.assign_user_roles(user.id, vec![role.id]).await.unwrap();
        let perm = svc
            .create_permission(NewPermission::new("doc:read"))
            .await
            .unwrap();

        // Simulate a resolver entry.
        cache
            .set(
                &format!("user_permissions:{}", user.id),
                vec![1],
                Duration::from_secs(300),
            )
            .await
            .unwrap();

        svc.update_role(
            role.id,
            RolePatch {
                permission_ids: Some(vec![perm.id]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert!(cache
            .get(&format!("user_permissions:{}", user.id))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_create_role_invalidates_role_and_resolver_caches() {
        let (svc, _store, cache) = setup();

        let role = svc.create_role(NewRole::new("first")).await.unwrap();
        svc.list_roles(0, 100).await.unwrap();
        svc.get_role(role.id).await.unwrap();
        cache
            .set("user_permissions:1", vec![1], Duration::from_secs(300))
            .await
            .unwrap();

        svc.create_role(NewRole::new("second")).await.unwrap();

        // List pages, item entries, and resolved permission sets all go.
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_create_permission_invalidates_permission_caches() {
        let (svc, _store, cache) = setup();

        let perm = svc
            .create_permission(NewPermission::new("doc:read"))
            .await
            .unwrap();
        svc.list_permissions(0, 100).await.unwrap();
        svc.get_permission(perm.id).await.unwrap();

        svc.create_permission(NewPermission::new("doc:write"))
            .await
            .unwrap();

        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_assign_roles_leaves_entity_caches() {
        let (svc, store, cache) = setup();

        let role = svc.create_role(NewRole::new("reader")).await.unwrap();
        let user = store.create_user(NewUser::new("bob", "h")).await.unwrap();

        // Warm the role cache.
        svc.get_role(role.id).await.unwrap();
        assert!(!cache.is_empty());

        svc.assign_user_roles(user.id, vec![role.id]).await.unwrap();

        // Entity caches survive; only user_permissions:* was targeted.
        assert!(cache
            .get(&format!("role:{}", role.id))
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_assign_unknown_roles_dropped() {
        let (svc, store, _cache) = setup();

        let role = svc.create_role(NewRole::new("reader")).await.unwrap();
        let user = store.create_user(NewUser::new("carol", "h")).await.unwrap();

        let user = svc
            .assign_user_roles(user.id, vec![role.id, 9999])
            .await
            .unwrap();
        assert_eq!(user.role_ids, vec![role.id]);
    }

    #[tokio::test]
    async fn test_delete_nonexistent_role_is_not_found() {
        let (svc, _store, cache) = setup();

        svc.create_role(NewRole::new("keep")).await.unwrap();
        svc.list_roles(0, 100).await.unwrap();
        let warm = cache.len();

        let err = svc.delete_role(404).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }));

        // Failed writes must not evict valid entries.
        assert_eq!(cache.len(), warm);
    }
}
