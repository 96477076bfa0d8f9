// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Cached effective-permission resolution.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;
use warden_cache::{CacheKey, CacheLayer};
use warden_core::{PermissionRegistry, RbacStore, StoreError, User};

// =============================================================================
// PermissionResolver
// =============================================================================

/// Resolves a user's effective permission set.
///
/// The effective set is the union of the permissions granted by the user's
/// roles. Superusers bypass the store entirely and receive the whole
/// registry universe. Non-superuser lookups go through the cache under
/// `user_permissions:{id}` with a short TTL, so role edits take effect
/// within that window even if invalidation is missed.
///
/// Resolution is fail-closed: if the store cannot be reached, the user has
/// no permissions for this request rather than stale or guessed ones.
pub struct PermissionResolver {
    store: Arc<dyn RbacStore>,
    registry: Arc<PermissionRegistry>,
    cache: CacheLayer,
    ttl: Duration,
}

impl PermissionResolver {
    /// Creates a new resolver.
    pub fn new(
        store: Arc<dyn RbacStore>,
        registry: Arc<PermissionRegistry>,
        cache: CacheLayer,
        ttl: Duration,
    ) -> Self {
        Self {
            store,
            registry,
            cache,
            ttl,
        }
    }

    /// Returns the user's effective permission names.
    pub async fn resolve(&self, user: &User) -> HashSet<String> {
        if user.is_superuser {
            return self.registry.names();
        }

        let key = CacheKey::new("user_permissions").arg(user.id);
        let store = self.store.clone();
        let role_ids = user.role_ids.clone();

        let result: Result<Vec<String>, StoreError> = self
            .cache
            .get_or_compute(&key, self.ttl, || async move {
                let permissions = store.permissions_for_roles(&role_ids).await?;
                Ok(permissions.into_iter().map(|p| p.name).collect())
            })
            .await;

        match result {
            Ok(names) => names.into_iter().collect(),
            Err(e) => {
                warn!(user_id = user.id, error = %e, "Permission resolution failed, denying all");
                HashSet::new()
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
