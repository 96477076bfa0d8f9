// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Health check handlers.

use axum::{response::IntoResponse, Json};

use crate::response::HealthResponse;

/// GET /health
///
/// Liveness probe. Public, no authentication.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse::healthy())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response() {
        let response = HealthResponse::healthy();
        assert_eq!(response.status, "ok");
        assert!(!response.version.is_empty());
    }
}
