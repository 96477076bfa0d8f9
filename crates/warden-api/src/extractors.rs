// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Custom extractors for API handlers.

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use warden_core::User;

use crate::auth::AuthContext;
use crate::error::ApiError;

// =============================================================================
// Auth Extractor
// =============================================================================

/// Extractor for authenticated requests.
///
/// Pulls the authenticated [`User`] out of the request extensions where the
/// auth middleware left it. Returns 401 on public paths or when no context
/// was attached.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(Auth(user): Auth) -> impl IntoResponse {
///     format!("Hello, {}", user.username)
/// }
/// ```
pub struct Auth(pub User);

impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .and_then(|ctx| ctx.user.clone())
            .map(Auth)
            .ok_or_else(|| ApiError::invalid_token("No authenticated user on request"))
    }
}

// =============================================================================
// Pagination Extractor
// =============================================================================

/// Query parameters for offset pagination.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct PaginationParams {
    /// Number of items to skip.
    #[serde(default)]
    pub skip: u32,
    /// Maximum number of items to return.
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    100
}

impl PaginationParams {
    /// Returns the limit, capped at 100.
    pub fn limit(&self) -> u32 {
        self.limit.min(100)
    }

    /// Validates the pagination parameters.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.limit == 0 {
            return Err(ApiError::validation("limit must be greater than 0"));
        }
        Ok(())
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: 100,
        }
    }
}

/// Extractor for pagination parameters.
pub struct Pagination(pub PaginationParams);

impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid pagination parameters: {}", e)))?;

        params.validate()?;
        Ok(Pagination(params))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let params = PaginationParams::default();
        assert_eq!(params.skip, 0);
        assert_eq!(params.limit(), 100);
    }

    #[test]
    fn test_pagination_limit_cap() {
        let params = PaginationParams {
            skip: 0,
            limit: 500,
        };
        assert_eq!(params.limit(), 100);
    }

    #[test]
    fn test_pagination_validation() {
        let zero = PaginationParams { skip: 0, limit: 0 };
        assert!(zero.validate().is_err());

        let ok = PaginationParams { skip: 10, limit: 50 };
        assert!(ok.validate().is_ok());
    }
}
