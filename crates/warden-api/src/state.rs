// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Application state shared across handlers.

use std::sync::Arc;

use warden_cache::{CacheLayer, CacheStore, MemoryCacheStore};
use warden_core::{MemoryStore, PermissionRegistry, RbacStore, UserStore};

use crate::auth::{AuthService, JwtManager};
use crate::config::ApiConfig;
use crate::rbac::{AuthorizationEngine, PermissionResolver, RbacService};

// =============================================================================
// AppState
// =============================================================================

/// Application state shared across all handlers.
///
/// This is the central state container that is passed to all handlers via
/// Axum's state extraction mechanism.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: Arc<ApiConfig>,
    /// JWT manager for token operations.
    pub jwt_manager: Arc<JwtManager>,
    /// User store.
    pub user_store: Arc<dyn UserStore>,
    /// Registration and login service.
    pub auth_service: Arc<AuthService>,
    /// Role and permission administration.
    pub rbac_service: Arc<RbacService>,
    /// Authorization checks.
    pub engine: Arc<AuthorizationEngine>,
    /// Permission registry.
    pub registry: Arc<PermissionRegistry>,
}

impl AppState {
    /// Creates a new app state builder.
    pub fn builder() -> AppStateBuilder {
        AppStateBuilder::new()
    }

    /// Returns the JWT manager.
    pub fn jwt(&self) -> &JwtManager {
        &self.jwt_manager
    }

    /// Returns the auth service.
    pub fn auth(&self) -> &AuthService {
        &self.auth_service
    }

    /// Returns the RBAC service.
    pub fn rbac(&self) -> &RbacService {
        &self.rbac_service
    }

    /// Returns the authorization engine.
    pub fn authz(&self) -> &AuthorizationEngine {
        &self.engine
    }
}

// =============================================================================
// AppStateBuilder
// =============================================================================

/// Builder for constructing AppState.
pub struct AppStateBuilder {
    config: Option<ApiConfig>,
    jwt_manager: Option<Arc<JwtManager>>,
    user_store: Option<Arc<dyn UserStore>>,
    rbac_store: Option<Arc<dyn RbacStore>>,
    cache_store: Option<Arc<dyn CacheStore>>,
    registry: Option<Arc<PermissionRegistry>>,
}

impl AppStateBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            config: None,
            jwt_manager: None,
            user_store: None,
            rbac_store: None,
            cache_store: None,
            registry: None,
        }
    }

    /// Sets the configuration.
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the JWT manager.
    pub fn jwt_manager(mut self, manager: Arc<JwtManager>) -> Self {
        self.jwt_manager = Some(manager);
        self
    }

    /// Sets the user store.
    pub fn user_store(mut self, store: Arc<dyn UserStore>) -> Self {
        self.user_store = Some(store);
        self
    }

    /// Sets the RBAC store.
    pub fn rbac_store(mut self, store: Arc<dyn RbacStore>) -> Self {
        self.rbac_store = Some(store);
        self
    }

    /// Sets one in-memory store as both user and RBAC backend.
    pub fn store(mut self, store: Arc<MemoryStore>) -> Self {
        self.user_store = Some(store.clone());
        self.rbac_store = Some(store);
        self
    }

    /// Sets the cache backend.
    pub fn cache_store(mut self, store: Arc<dyn CacheStore>) -> Self {
        self.cache_store = Some(store);
        self
    }

    /// Sets the permission registry.
    pub fn registry(mut self, registry: Arc<PermissionRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Builds the AppState.
    pub fn build(self) -> crate::error::ApiResult<AppState> {
        let config = self.config.unwrap_or_default();

        let jwt_manager = match self.jwt_manager {
            Some(manager) => manager,
            None => Arc::new(JwtManager::new(config.jwt.clone())?),
        };

        let user_store = self
            .user_store
            .ok_or_else(|| crate::error::ApiError::internal("User store is not configured"))?;
        let rbac_store = self
            .rbac_store
            .ok_or_else(|| crate::error::ApiError::internal("RBAC store is not configured"))?;

        let cache_store = self
            .cache_store
            .unwrap_or_else(|| Arc::new(MemoryCacheStore::new()));
        let cache = CacheLayer::new(cache_store);

        let registry = self
            .registry
            .unwrap_or_else(|| Arc::new(PermissionRegistry::builtin()));

        let auth_service = Arc::new(AuthService::new(user_store.clone(), jwt_manager.clone()));

        let resolver = Arc::new(PermissionResolver::new(
            rbac_store.clone(),
            registry.clone(),
            cache.clone(),
            config.cache_ttl.user_permissions,
        ));
        let engine = Arc::new(AuthorizationEngine::new(resolver));

        let rbac_service = Arc::new(RbacService::new(
            rbac_store,
            user_store.clone(),
            cache,
            config.cache_ttl.entity,
        ));

        Ok(AppState {
            config: Arc::new(config),
            jwt_manager,
            user_store,
            auth_service,
            rbac_service,
            engine,
            registry,
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// FromRef implementations for extracting parts of state
// =============================================================================

impl axum::extract::FromRef<AppState> for Arc<JwtManager> {
    fn from_ref(state: &AppState) -> Self {
        state.jwt_manager.clone()
    }
}

impl axum::extract::FromRef<AppState> for Arc<ApiConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::JwtConfig;

    fn test_config() -> ApiConfig {
        ApiConfig::default().with_jwt(JwtConfig::new(
            "test-secret-key-that-is-long-enough-for-testing",
        ))
    }

    #[test]
    fn test_app_state_builder() {
        let state = AppState::builder()
            .config(test_config())
            .store(Arc::new(MemoryStore::new()))
            .build()
            .unwrap();

        assert!(state.registry.contains("role:create"));
    }

    #[test]
    fn test_missing_store_fails() {
        let result = AppState::builder().config(test_config()).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_secret_fails() {
        let result = AppState::builder()
            .config(ApiConfig::default())
            .store(Arc::new(MemoryStore::new()))
            .build();
        assert!(result.is_err());
    }
}
