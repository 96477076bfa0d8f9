// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Registration and login service.

use std::sync::Arc;

use tracing::info;
use warden_core::{NewUser, User, UserStore};

use super::password::{hash_password, verify_password};
use super::JwtManager;
use crate::error::{ApiError, ApiResult};

/// Username that is bootstrapped as a superuser on registration.
const BOOTSTRAP_ADMIN_USERNAME: &str = "admin";

// =============================================================================
// Registration
// =============================================================================

/// Input for registering a new user.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Desired username.
    pub username: String,
    /// Plaintext password, hashed before it reaches the store.
    pub password: String,
    /// Email address.
    pub email: Option<String>,
    /// Display name.
    pub full_name: Option<String>,
}

// =============================================================================
// AuthService
// =============================================================================

/// Handles registration, credential checks, and token issuance.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn UserStore>,
    jwt: Arc<JwtManager>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(store: Arc<dyn UserStore>, jwt: Arc<JwtManager>) -> Self {
        Self { store, jwt }
    }

    /// Registers a new user.
    ///
    /// The plaintext password never reaches the store; only its bcrypt hash
    /// does. Registering the reserved admin username grants superuser.
    pub async fn register(&self, registration: Registration) -> ApiResult<User> {
        if registration.username.trim().is_empty() {
            return Err(ApiError::validation("Username must not be empty"));
        }
        if registration.password.len() < 8 {
            return Err(ApiError::validation(
                "Password must be at least 8 characters",
            ));
        }

        let password_hash = hash_password(&registration.password)?;

        let mut new_user = NewUser::new(registration.username.trim(), password_hash);
        new_user.email = registration.email;
        new_user.full_name = registration.full_name;
        new_user.is_superuser = registration.username.trim() == BOOTSTRAP_ADMIN_USERNAME;

        let user = self.store.create_user(new_user).await?;

        info!(user_id = user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Checks credentials and returns the user.
    ///
    /// An unknown username and a wrong password produce the same error, so
    /// the login endpoint cannot be used to enumerate accounts.
    pub async fn authenticate(&self, username: &str, password: &str) -> ApiResult<User> {
        let user = self
            .store
            .get_user_by_username(username)
            .await?
            .ok_or_else(ApiError::invalid_credentials)?;

        if !verify_password(password, &user.password_hash) {
            return Err(ApiError::invalid_credentials());
        }

        if !user.is_active {
            return Err(ApiError::forbidden("Inactive user"));
        }

        Ok(user)
    }

    /// Authenticates and issues an access token.
    ///
    /// Returns the token together with its lifetime in seconds.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<(String, i64)> {
        let user = self.authenticate(username, password).await?;
        let token = self.jwt.create_access_token(user.id)?;

        info!(user_id = user.id, "User logged in");
        Ok((token, self.jwt.expiration_secs()))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::JwtConfig;
    use warden_core::MemoryStore;

    fn service() -> AuthService {
        let store = Arc::new(MemoryStore::new());
        let jwt = Arc::new(
            JwtManager::new(JwtConfig::new("test-secret-key-that-is-long-enough")).unwrap(),
        );
        AuthService::new(store, jwt)
    }

    fn registration(username: &str) -> Registration {
        Registration {
            username: username.to_string(),
            password: "hunter22pass".to_string(),
            email: None,
            full_name: None,
        }
    }

    #[tokio::test]
    async fn test_register_and_login() {
        let svc = service();

        let user = svc.register(registration("alice")).await.unwrap();
        assert!(!user.is_superuser);
        assert_ne!(user.password_hash, "hunter22pass");

        let (token, expires_in) = svc.login("alice", "hunter22pass").await.unwrap();
        assert!(!token.is_empty());
        assert_eq!(expires_in, 1800);
    }

    #[tokio::test]
    async fn test_admin_username_grants_superuser() {
        let svc = service();
        let user = svc.register(registration("admin")).await.unwrap();
        assert!(user.is_superuser);
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let svc = service();
        svc.register(registration("alice")).await.unwrap();

        let err = svc.register(registration("alice")).await.unwrap_err();
        assert!(matches!(err, ApiError::AlreadyExists { .. }));
    }

    #[tokio::test]
    async fn test_short_password_rejected() {
        let svc = service();
        let err = svc
            .register(Registration {
                password: "short".to_string(),
                ..registration("alice")
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_look_identical() {
        let svc = service();
        svc.register(registration("alice")).await.unwrap();

        let a = svc.login("alice", "wrong-password").await.unwrap_err();
        let b = svc.login("nobody", "hunter22pass").await.unwrap_err();

        assert_eq!(a.error_code(), b.error_code());
        assert_eq!(a.user_message(), b.user_message());
    }
}
