// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Domain entities and their create/patch payloads.

use serde::{Deserialize, Serialize};

// =============================================================================
// User
// =============================================================================

/// A registered user.
///
/// Users never hold permissions directly; they are granted roles, and the
/// effective permission set is derived from those roles (or, for a
/// superuser, from the full permission registry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Unique username.
    pub username: String,
    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Hashed credential. Never the plaintext.
    #[serde(skip_serializing)]
    #[serde(default)]
    pub password_hash: String,
    /// Whether the account is active.
    pub is_active: bool,
    /// Superusers hold the entire permission universe.
    pub is_superuser: bool,
    /// IDs of the roles assigned to this user.
    #[serde(default)]
    pub role_ids: Vec<i64>,
}

impl User {
    /// Returns `true` if the user has the given role assigned.
    pub fn has_role(&self, role_id: i64) -> bool {
        self.role_ids.contains(&role_id)
    }
}

/// Payload for creating a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Unique username.
    pub username: String,
    /// Hashed credential.
    pub password_hash: String,
    /// Email address.
    pub email: Option<String>,
    /// Display name.
    pub full_name: Option<String>,
    /// Whether the account starts as a superuser.
    pub is_superuser: bool,
}

impl NewUser {
    /// Creates a new-user payload with the given username and hash.
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            email: None,
            full_name: None,
            is_superuser: false,
        }
    }

    /// Sets the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the display name.
    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    /// Marks the user as a superuser.
    pub fn superuser(mut self) -> Self {
        self.is_superuser = true;
        self
    }
}

// =============================================================================
// Role
// =============================================================================

/// A named group of permissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    /// Unique role ID.
    pub id: i64,
    /// Unique role name.
    pub name: String,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// IDs of the permissions granted by this role.
    #[serde(default)]
    pub permission_ids: Vec<i64>,
}

/// Payload for creating a role.
#[derive(Debug, Clone, Default)]
pub struct NewRole {
    /// Unique role name.
    pub name: String,
    /// Human-readable description.
    pub description: Option<String>,
    /// Permission IDs granted by the role. Unknown IDs are ignored.
    pub permission_ids: Vec<i64>,
}

impl NewRole {
    /// Creates a new-role payload with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the permission IDs.
    pub fn with_permissions(mut self, permission_ids: Vec<i64>) -> Self {
        self.permission_ids = permission_ids;
        self
    }
}

/// Partial update for a role.
///
/// Only fields that are `Some` are applied; `None` fields are untouched.
/// A present `permission_ids` replaces the role's permission set wholesale.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RolePatch {
    /// New role name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// Replacement permission set.
    pub permission_ids: Option<Vec<i64>>,
}

impl RolePatch {
    /// Returns `true` if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.permission_ids.is_none()
    }
}

// =============================================================================
// Permission
// =============================================================================

/// A fine-grained permission, named `"<resource>:<action>"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    /// Unique permission ID.
    pub id: i64,
    /// Unique permission name, e.g. `"role:create"`.
    pub name: String,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Payload for creating a permission.
#[derive(Debug, Clone, Default)]
pub struct NewPermission {
    /// Unique permission name.
    pub name: String,
    /// Human-readable description.
    pub description: Option<String>,
}

impl NewPermission {
    /// Creates a new-permission payload with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Partial update for a permission.
///
/// Only fields that are `Some` are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PermissionPatch {
    /// New permission name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
}

impl PermissionPatch {
    /// Returns `true` if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_builder() {
        let new = NewUser::new("alice", "$2b$12$hash")
            .with_email("alice@example.com")
            .superuser();

        assert_eq!(new.username, "alice");
        assert_eq!(new.email.as_deref(), Some("alice@example.com"));
        assert!(new.is_superuser);
        assert!(new.full_name.is_none());
    }

    #[test]
    fn test_role_patch_empty() {
        assert!(RolePatch::default().is_empty());

        let patch = RolePatch {
            permission_ids: Some(vec![1, 2]),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_user_serialization_hides_password_hash() {
        let user = User {
            id: 1,
            username: "alice".to_string(),
            email: None,
            full_name: None,
            password_hash: "$2b$12$secret".to_string(),
            is_active: true,
            is_superuser: false,
            role_ids: vec![],
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret"));
        assert!(json.contains("alice"));
    }
}
