// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The static universe of permission names.
//!
//! Every permission the system can ever require is enumerated here as an
//! explicit constant. The registry is built once at startup and consulted
//! directly; there is no runtime reflection over a constants class.
//!
//! Names follow the `"<resource>:<action>"` convention.

use std::collections::BTreeSet;

/// Permission name constants, grouped by resource.
pub mod perms {
    // =========================================================================
    // User management
    // =========================================================================
    /// Create users.
    pub const USER_CREATE: &str = "user:create";
    /// Read user information.
    pub const USER_READ: &str = "user:read";
    /// Update users, including role assignment.
    pub const USER_UPDATE: &str = "user:update";
    /// Delete users.
    pub const USER_DELETE: &str = "user:delete";

    // =========================================================================
    // Role management
    // =========================================================================
    /// Create roles.
    pub const ROLE_CREATE: &str = "role:create";
    /// Read roles.
    pub const ROLE_READ: &str = "role:read";
    /// Update roles, including their permission set.
    pub const ROLE_UPDATE: &str = "role:update";
    /// Delete roles.
    pub const ROLE_DELETE: &str = "role:delete";

    // =========================================================================
    // Permission management
    // =========================================================================
    /// Create permissions.
    pub const PERMISSION_CREATE: &str = "permission:create";
    /// Read permissions.
    pub const PERMISSION_READ: &str = "permission:read";
    /// Update permissions.
    pub const PERMISSION_UPDATE: &str = "permission:update";
    /// Delete permissions.
    pub const PERMISSION_DELETE: &str = "permission:delete";

    // =========================================================================
    // Auto-reply rules
    // =========================================================================
    /// Create auto-reply rules.
    pub const RULE_CREATE: &str = "rule:create";
    /// Read auto-reply rules.
    pub const RULE_READ: &str = "rule:read";
    /// Update auto-reply rules.
    pub const RULE_UPDATE: &str = "rule:update";
    /// Delete auto-reply rules.
    pub const RULE_DELETE: &str = "rule:delete";

    // =========================================================================
    // Messages
    // =========================================================================
    /// Create messages.
    pub const MESSAGE_CREATE: &str = "message:create";
    /// Read messages.
    pub const MESSAGE_READ: &str = "message:read";
    /// Update messages.
    pub const MESSAGE_UPDATE: &str = "message:update";
    /// Delete messages.
    pub const MESSAGE_DELETE: &str = "message:delete";

    /// Returns every declared permission name.
    pub const fn all() -> [&'static str; 20] {
        [
            USER_CREATE,
            USER_READ,
            USER_UPDATE,
            USER_DELETE,
            ROLE_CREATE,
            ROLE_READ,
            ROLE_UPDATE,
            ROLE_DELETE,
            PERMISSION_CREATE,
            PERMISSION_READ,
            PERMISSION_UPDATE,
            PERMISSION_DELETE,
            RULE_CREATE,
            RULE_READ,
            RULE_UPDATE,
            RULE_DELETE,
            MESSAGE_CREATE,
            MESSAGE_READ,
            MESSAGE_UPDATE,
            MESSAGE_DELETE,
        ]
    }
}

// =============================================================================
// PermissionRegistry
// =============================================================================

/// The set of all permission names known to the system.
///
/// A superuser's effective permission set is defined as this registry.
/// The registry is created once at startup and shared across all requests.
#[derive(Debug, Clone)]
pub struct PermissionRegistry {
    names: BTreeSet<String>,
}

impl PermissionRegistry {
    /// Creates the registry from the built-in permission constants.
    pub fn builtin() -> Self {
        Self {
            names: perms::all().iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Creates a registry from an explicit list of names.
    pub fn from_names(names: impl IntoIterator<Item = String>) -> Self {
        Self {
            names: names.into_iter().collect(),
        }
    }

    /// Returns `true` if the registry declares the given name.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Returns the number of declared permissions.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns an iterator over the declared names, in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|s| s.as_str())
    }

    /// Returns the declared names as an owned set.
    pub fn names(&self) -> std::collections::HashSet<String> {
        self.names.iter().cloned().collect()
    }
}

impl Default for PermissionRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry() {
        let registry = PermissionRegistry::builtin();

        assert_eq!(registry.len(), 20);
        assert!(registry.contains(perms::ROLE_CREATE));
        assert!(registry.contains("message:delete"));
        assert!(!registry.contains("role:fly"));
    }

    #[test]
    fn test_all_names_follow_convention() {
        for name in perms::all() {
            let mut parts = name.split(':');
            assert!(parts.next().is_some_and(|p| !p.is_empty()), "{name}");
            assert!(parts.next().is_some_and(|p| !p.is_empty()), "{name}");
            assert!(parts.next().is_none(), "{name}");
        }
    }

    #[test]
    fn test_from_names() {
        let registry = PermissionRegistry::from_names(vec![
            "widget:read".to_string(),
            "widget:write".to_string(),
        ]);

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("widget:read"));
        assert!(!registry.contains(perms::USER_READ));
    }
}
