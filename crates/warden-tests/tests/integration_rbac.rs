// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # RBAC Integration Tests
//!
//! Integration tests for the authorization stack:
//!
//! - Permission resolution across multiple roles
//! - Superuser override against the registry
//! - Conjunctive (all-of) authorization
//! - Cache invalidation on role and assignment changes
//!
//! ## Test Categories
//!
//! - `test_resolve_*`: Permission resolution tests
//! - `test_authorize_*`: Authorization engine tests
//! - `test_invalidate_*`: Cache invalidation tests

use std::sync::Arc;
use std::time::Duration;

use warden_api::rbac::{AuthorizationEngine, PermissionResolver};
use warden_api::ApiError;
use warden_cache::{CacheLayer, MemoryCacheStore};
use warden_core::{NewUser, PermissionRegistry, RolePatch, User, UserStore};
use warden_tests::prelude::*;

// =============================================================================
// Test Helpers
// =============================================================================

struct RbacHarness {
    app: TestApp,
    resolver: Arc<PermissionResolver>,
    engine: AuthorizationEngine,
}

fn rbac_harness() -> RbacHarness {
    init_test_logging();
    let app = TestApp::new();
    let resolver = Arc::new(PermissionResolver::new(
        app.store.clone(),
        Arc::new(PermissionRegistry::builtin()),
        CacheLayer::new(app.cache.clone()),
        Duration::from_secs(300),
    ));
    let engine = AuthorizationEngine::new(resolver.clone());
    RbacHarness {
        app,
        resolver,
        engine,
    }
}

async fn make_user(app: &TestApp, username: &str) -> User {
    app.store
        .create_user(NewUser::new(username, "irrelevant-hash"))
        .await
        .unwrap()
}

/// Seeds a role holding the given permissions and assigns it to the user.
async fn grant(app: &TestApp, user: &User, role_name: &str, permissions: &[&str]) {
    let mut permission_ids = Vec::new();
    for name in permissions {
        let permission = app
            .state
            .rbac()
            .create_permission(warden_core::NewPermission::new(*name))
            .await
            .unwrap();
        permission_ids.push(permission.id);
    }
    let role = app
        .state
        .rbac()
        .create_role(warden_core::NewRole::new(role_name).with_permissions(permission_ids))
        .await
        .unwrap();

    let mut role_ids: Vec<i64> = user.role_ids.clone();
    role_ids.push(role.id);
    app.state
        .rbac()
        .assign_user_roles(user.id, role_ids)
        .await
        .unwrap();
}

// =============================================================================
// Permission Resolution Tests
// =============================================================================

#[tokio::test]
async fn test_resolve_unions_permissions_across_roles() {
    let h = rbac_harness();
    let user = make_user(&h.app, "multi-role").await;

    grant(&h.app, &user, "readers", &["document:read"]).await;
    let user = h.app.store.get_user(user.id).await.unwrap().unwrap();
    grant(&h.app, &user, "writers", &["document:write", "document:read2"]).await;

    let user = h.app.store.get_user(user.id).await.unwrap().unwrap();
    let resolved = h.resolver.resolve(&user).await;

    assert!(resolved.contains("document:read"));
    assert!(resolved.contains("document:write"));
    assert!(resolved.contains("document:read2"));
}

#[tokio::test]
async fn test_resolve_roleless_user_has_no_permissions() {
    let h = rbac_harness();
    let user = make_user(&h.app, "roleless").await;
    assert!(h.resolver.resolve(&user).await.is_empty());
}

#[tokio::test]
async fn test_resolve_superuser_gets_registry_universe() {
    let h = rbac_harness();
    let user = h
        .app
        .store
        .create_user(NewUser::new("root", "irrelevant-hash").superuser())
        .await
        .unwrap();

    let resolved = h.resolver.resolve(&user).await;
    let registry = PermissionRegistry::builtin();
    assert_eq!(resolved, registry.names());

    // Superuser resolution never touches the cache.
    assert!(h.app.cache.is_empty());
}

#[tokio::test]
async fn test_resolve_caches_under_user_permissions_key() {
    let h = rbac_harness();
    let user = make_user(&h.app, "cached").await;
    grant(&h.app, &user, "cached-role", &["document:read"]).await;
    let user = h.app.store.get_user(user.id).await.unwrap().unwrap();

    h.resolver.resolve(&user).await;
    let expected = format!("user_permissions:{}", user.id);
    assert!(h.app.cache.keys().contains(&expected));
}

// =============================================================================
// Authorization Engine Tests
// =============================================================================

#[tokio::test]
async fn test_authorize_requires_every_permission() {
    let h = rbac_harness();
    let user = make_user(&h.app, "partial").await;
    grant(&h.app, &user, "partial-role", &["document:read"]).await;
    let user = h.app.store.get_user(user.id).await.unwrap().unwrap();

    assert!(h.engine.authorize(&user, &["document:read"]).await);
    assert!(
        !h.engine
            .authorize(&user, &["document:read", "document:write"])
            .await
    );
}

#[tokio::test]
async fn test_authorize_empty_requirement_passes() {
    let h = rbac_harness();
    let user = make_user(&h.app, "anyone").await;
    assert!(h.engine.authorize(&user, &[]).await);
}

#[tokio::test]
async fn test_authorize_superuser_short_circuits() {
    let h = rbac_harness();
    let user = h
        .app
        .store
        .create_user(NewUser::new("superman", "irrelevant-hash").superuser())
        .await
        .unwrap();

    assert!(h.engine.authorize(&user, &["anything:at-all"]).await);
}

#[tokio::test]
async fn test_authorize_require_maps_to_forbidden() {
    let h = rbac_harness();
    let user = make_user(&h.app, "denied").await;

    let err = h
        .engine
        .require(&user, &["document:delete"])
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Forbidden { .. }));
}

// =============================================================================
// Cache Invalidation Tests
// =============================================================================

#[tokio::test]
async fn test_invalidate_role_update_drops_user_permissions() {
    let h = rbac_harness();
    let user = make_user(&h.app, "invalidated").await;
    grant(&h.app, &user, "mutable-role", &["document:read"]).await;
    let user = h.app.store.get_user(user.id).await.unwrap().unwrap();
    let role_id = *user.role_ids.first().unwrap();

    // Warm the cache, then strip the role's permissions.
    assert!(h.resolver.resolve(&user).await.contains("document:read"));
    h.app
        .state
        .rbac()
        .update_role(
            role_id,
            RolePatch {
                permission_ids: Some(vec![]),
                ..RolePatch::default()
            },
        )
        .await
        .unwrap();

    // The stale grant must not survive the role change.
    assert!(h.resolver.resolve(&user).await.is_empty());
}

#[tokio::test]
async fn test_invalidate_reassignment_is_visible_immediately() {
    let h = rbac_harness();
    let user = make_user(&h.app, "reassigned").await;
    grant(&h.app, &user, "old-role", &["document:read"]).await;
    let user = h.app.store.get_user(user.id).await.unwrap().unwrap();

    assert!(h.resolver.resolve(&user).await.contains("document:read"));

    // Strip all roles; re-resolution must reflect the empty assignment.
    h.app
        .state
        .rbac()
        .assign_user_roles(user.id, vec![])
        .await
        .unwrap();
    let user = h.app.store.get_user(user.id).await.unwrap().unwrap();
    assert!(h.resolver.resolve(&user).await.is_empty());
}

#[tokio::test]
async fn test_invalidate_unknown_role_ids_are_dropped() {
    let h = rbac_harness();
    let user = make_user(&h.app, "sparse").await;
    grant(&h.app, &user, "real-role", &["document:read"]).await;
    let user = h.app.store.get_user(user.id).await.unwrap().unwrap();
    let real_role = *user.role_ids.first().unwrap();

    let updated = h
        .app
        .state
        .rbac()
        .assign_user_roles(user.id, vec![real_role, 9999])
        .await
        .unwrap();
    assert_eq!(updated.role_ids, vec![real_role]);
}
