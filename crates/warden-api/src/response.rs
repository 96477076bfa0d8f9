// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API response types.

use serde::{Deserialize, Serialize};
use warden_core::{Permission, Role, User};

// =============================================================================
// Auth Responses
// =============================================================================

/// Token issued on a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Access token.
    pub access_token: String,
    /// Token type (always "bearer").
    pub token_type: String,
    /// Expires in seconds.
    pub expires_in: i64,
}

impl TokenResponse {
    /// Creates a new token response.
    pub fn new(access_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
            expires_in,
        }
    }
}

// =============================================================================
// Entity Responses
// =============================================================================

/// Public view of a user. Never carries the password hash.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Whether the account is active.
    pub is_active: bool,
    /// Whether the account is a superuser.
    pub is_superuser: bool,
    /// IDs of the assigned roles.
    pub role_ids: Vec<i64>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            is_active: user.is_active,
            is_superuser: user.is_superuser,
            role_ids: user.role_ids,
        }
    }
}

/// A role together with its resolved permission objects.
#[derive(Debug, Serialize, Deserialize)]
pub struct RoleResponse {
    /// Role ID.
    pub id: i64,
    /// Role name.
    pub name: String,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Permissions granted by this role.
    pub permissions: Vec<PermissionResponse>,
}

impl RoleResponse {
    /// Builds a response from a role and its permission objects.
    pub fn new(role: Role, permissions: Vec<Permission>) -> Self {
        Self {
            id: role.id,
            name: role.name,
            description: role.description,
            permissions: permissions.into_iter().map(Into::into).collect(),
        }
    }
}

/// Public view of a permission.
#[derive(Debug, Serialize, Deserialize)]
pub struct PermissionResponse {
    /// Permission ID.
    pub id: i64,
    /// Permission name.
    pub name: String,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<Permission> for PermissionResponse {
    fn from(permission: Permission) -> Self {
        Self {
            id: permission.id,
            name: permission.name,
            description: permission.description,
        }
    }
}

// =============================================================================
// Health
// =============================================================================

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Version string.
    pub version: String,
}

impl HealthResponse {
    /// Creates a healthy response.
    pub fn healthy() -> Self {
        Self {
            status: "ok".to_string(),
            version: crate::VERSION.to_string(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_response_drops_password_hash() {
        let user = User {
            id: 1,
            username: "alice".to_string(),
            email: Some("alice@example.com".to_string()),
            full_name: None,
            password_hash: "$2b$12$secret".to_string(),
            is_active: true,
            is_superuser: false,
            role_ids: vec![2, 3],
        };

        let response = UserResponse::from(user);
        let json = serde_json::to_string(&response).unwrap();

        assert!(!json.contains("secret"));
        assert!(!json.contains("password"));
        assert!(json.contains("alice"));
    }

    #[test]
    fn test_token_response_type() {
        let response = TokenResponse::new("abc".to_string(), 1800);
        assert_eq!(response.token_type, "bearer");
        assert_eq!(response.expires_in, 1800);
    }

    #[test]
    fn test_role_response_embeds_permissions() {
        let role = Role {
            id: 1,
            name: "editor".to_string(),
            description: None,
            permission_ids: vec![5],
        };
        let perm = Permission {
            id: 5,
            name: "doc:write".to_string(),
            description: None,
        };

        let response = RoleResponse::new(role, vec![perm]);
        assert_eq!(response.permissions.len(), 1);
        assert_eq!(response.permissions[0].name, "doc:write");
    }
}
