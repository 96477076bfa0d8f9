// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API error types and handling.
//!
//! This module provides a comprehensive error type that maps to HTTP status
//! codes and JSON error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use warden_core::StoreError;

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// ApiError
// =============================================================================

/// API error type with HTTP status code mapping.
///
/// This error type is designed to be returned from handlers and automatically
/// converted to appropriate HTTP responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Login failed (401). Covers both an unknown username and a wrong
    /// password so the response does not reveal which one it was.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Token missing, malformed, expired, or signed with the wrong key (401).
    #[error("Invalid token: {message}")]
    InvalidToken {
        /// Error message (for logging, not user-facing).
        message: String,
    },

    /// Resource not found (404).
    #[error("Resource not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// Unique constraint violation (409).
    #[error("Already exists: {resource}")]
    AlreadyExists {
        /// The resource that already exists.
        resource: String,
    },

    /// Forbidden (403).
    #[error("Forbidden: {message}")]
    Forbidden {
        /// Error message.
        message: String,
    },

    /// Bad request (400).
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message.
        message: String,
    },

    /// Validation error (422).
    #[error("Validation error: {message}")]
    Validation {
        /// Error message.
        message: String,
    },

    /// Backing store unavailable (503).
    #[error("Store unavailable: {message}")]
    StoreUnavailable {
        /// Error message.
        message: String,
    },

    /// Internal server error (500).
    #[error("Internal error: {message}")]
    Internal {
        /// Error message (for logging, not user-facing).
        message: String,
    },
}

impl ApiError {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Creates an invalid-credentials error.
    pub fn invalid_credentials() -> Self {
        Self::InvalidCredentials
    }

    /// Creates an invalid-token error.
    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::InvalidToken {
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Creates an already-exists error.
    pub fn already_exists(resource: impl Into<String>) -> Self {
        Self::AlreadyExists {
            resource: resource.into(),
        }
    }

    /// Creates a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Creates a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a store-unavailable error.
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    // =========================================================================
    // Properties
    // =========================================================================

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::InvalidToken { .. } => StatusCode::UNAUTHORIZED,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::AlreadyExists { .. } => StatusCode::CONFLICT,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error code for categorization.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::InvalidCredentials => "INVALID_CREDENTIALS",
            ApiError::InvalidToken { .. } => "INVALID_TOKEN",
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::AlreadyExists { .. } => "ALREADY_EXISTS",
            ApiError::Forbidden { .. } => "FORBIDDEN",
            ApiError::BadRequest { .. } => "BAD_REQUEST",
            ApiError::Validation { .. } => "VALIDATION_ERROR",
            ApiError::StoreUnavailable { .. } => "STORE_UNAVAILABLE",
            ApiError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Returns a user-friendly error message.
    ///
    /// This message is safe to show to end users and does not expose
    /// internal implementation details.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::InvalidCredentials => "Incorrect username or password".to_string(),
            ApiError::InvalidToken { .. } => "Could not validate credentials".to_string(),
            ApiError::NotFound { resource } => format!("{} not found", resource),
            ApiError::AlreadyExists { resource } => format!("{} already exists", resource),
            ApiError::Forbidden { message } => message.clone(),
            ApiError::BadRequest { message } => message.clone(),
            ApiError::Validation { message } => message.clone(),
            ApiError::StoreUnavailable { .. } => "Service temporarily unavailable".to_string(),
            ApiError::Internal { .. } => "Internal server error".to_string(),
        }
    }

    /// Returns `true` if this error should be logged at error level.
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            ApiError::Internal { .. } | ApiError::StoreUnavailable { .. }
        )
    }
}

// =============================================================================
// IntoResponse Implementation
// =============================================================================

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.user_message();

        // Log server errors
        if self.is_server_error() {
            tracing::error!(
                error = %self,
                error_code = error_code,
                status = %status,
                "Server error occurred"
            );
        } else {
            tracing::debug!(
                error = %self,
                error_code = error_code,
                status = %status,
                "Client error occurred"
            );
        }

        let body = ErrorResponseBody {
            error: ErrorDetails {
                code: error_code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Error Response Body
// =============================================================================

/// Error response body structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponseBody {
    /// Error details.
    pub error: ErrorDetails,
}

/// Error details within the response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

// =============================================================================
// From Implementations
// =============================================================================

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { kind } => ApiError::not_found(kind.as_str()),
            StoreError::AlreadyExists { kind } => ApiError::already_exists(kind.as_str()),
            StoreError::Unavailable { message } => ApiError::store_unavailable(message),
            StoreError::Internal { message } => ApiError::internal(message),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::bad_request(format!("Invalid JSON: {}", err))
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::internal(format!("IO error: {}", err))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use warden_core::EntityKind;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            ApiError::invalid_credentials().status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::invalid_token("bad signature").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::not_found("Role").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::already_exists("User").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::forbidden("no access").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::validation("bad name").status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::internal("crash").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ApiError::invalid_credentials().error_code(),
            "INVALID_CREDENTIALS"
        );
        assert_eq!(ApiError::invalid_token("x").error_code(), "INVALID_TOKEN");
        assert_eq!(ApiError::forbidden("x").error_code(), "FORBIDDEN");
        assert_eq!(
            ApiError::store_unavailable("x").error_code(),
            "STORE_UNAVAILABLE"
        );
    }

    #[test]
    fn test_store_error_mapping() {
        let err: ApiError = StoreError::not_found(EntityKind::Role).into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err: ApiError = StoreError::already_exists(EntityKind::User).into();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);

        let err: ApiError = StoreError::unavailable("connection refused").into();
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_credential_errors_do_not_leak_detail() {
        let msg = ApiError::invalid_credentials().user_message();
        assert_eq!(msg, "Incorrect username or password");

        let msg = ApiError::invalid_token("signature mismatch at byte 12").user_message();
        assert!(!msg.contains("signature"));
    }
}
