// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Conjunctive authorization checks.

use std::sync::Arc;

use tracing::debug;
use warden_core::User;

use super::PermissionResolver;
use crate::error::{ApiError, ApiResult};

// =============================================================================
// AuthorizationEngine
// =============================================================================

/// Decides whether a user may perform an operation.
///
/// Checks are conjunctive: the user must hold every required permission.
/// Superusers pass without touching the resolver.
pub struct AuthorizationEngine {
    resolver: Arc<PermissionResolver>,
}

impl AuthorizationEngine {
    /// Creates a new engine.
    pub fn new(resolver: Arc<PermissionResolver>) -> Self {
        Self { resolver }
    }

    /// Returns `true` if the user holds every permission in `required`.
    ///
    /// An empty requirement always passes.
    pub async fn authorize(&self, user: &User, required: &[&str]) -> bool {
        if user.is_superuser {
            return true;
        }
        if required.is_empty() {
            return true;
        }

        let held = self.resolver.resolve(user).await;
        required.iter().all(|p| held.contains(*p))
    }

    /// Like [`authorize`](Self::authorize), but returns a 403 error on
    /// failure.
    pub async fn require(&self, user: &User, required: &[&str]) -> ApiResult<()> {
        if self.authorize(user, required).await {
            Ok(())
        } else {
            debug!(user_id = user.id, required = ?required, "Authorization denied");
            Err(ApiError::forbidden("Not enough permissions"))
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
