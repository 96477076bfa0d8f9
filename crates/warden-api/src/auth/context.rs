// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Per-request authentication context.

use std::net::IpAddr;

use uuid::Uuid;
use warden_core::User;

// =============================================================================
// AuthContext
// =============================================================================

/// Authentication context attached to each request.
///
/// The middleware builds one of these and stores it in the request
/// extensions. Handlers pull it back out through the `Auth` extractor.
/// Public paths carry an anonymous context so downstream code always finds
/// one.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// The authenticated user, or `None` on public paths.
    pub user: Option<User>,
    /// Request ID for correlation.
    pub request_id: Uuid,
    /// Client IP address, if known.
    pub client_ip: Option<IpAddr>,
}

impl AuthContext {
    /// Creates an anonymous context for public paths.
    pub fn anonymous() -> Self {
        Self {
            user: None,
            request_id: Uuid::now_v7(),
            client_ip: None,
        }
    }

    /// Creates a context for an authenticated user.
    pub fn authenticated(user: User) -> Self {
        Self {
            user: Some(user),
            request_id: Uuid::now_v7(),
            client_ip: None,
        }
    }

    /// Sets the request ID.
    pub fn with_request_id(mut self, request_id: Uuid) -> Self {
        self.request_id = request_id;
        self
    }

    /// Sets the client IP.
    pub fn with_client_ip(mut self, ip: IpAddr) -> Self {
        self.client_ip = Some(ip);
        self
    }

    /// Returns `true` if no user is attached.
    pub fn is_anonymous(&self) -> bool {
        self.user.is_none()
    }

    /// Returns the user ID, if authenticated.
    pub fn user_id(&self) -> Option<i64> {
        self.user.as_ref().map(|u| u.id)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User {
            id: 7,
            username: "alice".to_string(),
            email: None,
            full_name: None,
            password_hash: String::new(),
            is_active: true,
            is_superuser: false,
            role_ids: vec![],
        }
    }

    #[test]
    fn test_anonymous_context() {
        let ctx = AuthContext::anonymous();
        assert!(ctx.is_anonymous());
        assert!(ctx.user_id().is_none());
    }

    #[test]
    fn test_authenticated_context() {
        let ctx = AuthContext::authenticated(test_user());
        assert!(!ctx.is_anonymous());
        assert_eq!(ctx.user_id(), Some(7));
    }
}
