// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Fixtures
//!
//! Pre-built test data for consistent and reproducible testing.

use warden_api::auth::Registration;
use warden_api::{ApiConfig, JwtConfig};
use warden_core::{NewPermission, NewRole};

/// JWT signing secret used across tests. Long enough to clear the
/// minimum-length warning.
pub const TEST_JWT_SECRET: &str = "test-secret-key-for-jwt-signing-must-be-at-least-32-chars";

/// Default password used for fixture users.
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Creates a test JWT configuration with a valid secret.
pub fn test_jwt_config() -> JwtConfig {
    JwtConfig::new(TEST_JWT_SECRET)
}

/// Creates a test API configuration backed by [`test_jwt_config`].
pub fn test_api_config() -> ApiConfig {
    ApiConfig {
        jwt: test_jwt_config(),
        ..ApiConfig::default()
    }
}

// =============================================================================
// User Fixtures
// =============================================================================

/// Fixture providing standard registration payloads.
pub struct UserFixtures;

impl UserFixtures {
    /// A plain member registration.
    pub fn member(username: impl Into<String>) -> Registration {
        Registration {
            username: username.into(),
            password: TEST_PASSWORD.to_string(),
            email: Some("member@example.com".to_string()),
            full_name: Some("Test Member".to_string()),
        }
    }

    /// The bootstrap admin registration. The username alone grants
    /// superuser status.
    pub fn admin() -> Registration {
        Registration {
            username: "admin".to_string(),
            password: TEST_PASSWORD.to_string(),
            email: Some("admin@example.com".to_string()),
            full_name: Some("Administrator".to_string()),
        }
    }
}

// =============================================================================
// RBAC Fixtures
// =============================================================================

/// Fixture providing standard roles and permissions.
pub struct RbacFixtures;

impl RbacFixtures {
    /// A document-editor role.
    pub fn editor_role() -> NewRole {
        NewRole::new("editor").with_description("Can read and write documents")
    }

    /// A read-only viewer role.
    pub fn viewer_role() -> NewRole {
        NewRole::new("viewer").with_description("Read-only access")
    }

    /// A document-read permission.
    pub fn doc_read() -> NewPermission {
        NewPermission::new("document:read").with_description("Read documents")
    }

    /// A document-write permission.
    pub fn doc_write() -> NewPermission {
        NewPermission::new("document:write").with_description("Write documents")
    }

    /// A document-delete permission.
    pub fn doc_delete() -> NewPermission {
        NewPermission::new("document:delete").with_description("Delete documents")
    }
}
