// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Store-level error hierarchy.
//!
//! `StoreError` separates business outcomes (`NotFound`, `AlreadyExists`)
//! from transport failure (`Unavailable`) so that callers can map each to
//! the correct response without inspecting messages.

use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// EntityKind
// =============================================================================

/// The kind of entity a store operation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A user account.
    User,
    /// A role.
    Role,
    /// A permission.
    Permission,
}

impl EntityKind {
    /// Returns the kind name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::User => "user",
            EntityKind::Role => "role",
            EntityKind::Permission => "permission",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// StoreError
// =============================================================================

/// Errors produced by the entity stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The referenced entity does not exist.
    #[error("{kind} not found")]
    NotFound {
        /// Entity kind.
        kind: EntityKind,
    },

    /// A uniqueness constraint was violated.
    #[error("{kind} already exists")]
    AlreadyExists {
        /// Entity kind.
        kind: EntityKind,
    },

    /// The store could not be reached or the transaction failed.
    ///
    /// Any partial writes have been rolled back.
    #[error("store unavailable: {message}")]
    Unavailable {
        /// Failure description.
        message: String,
    },

    /// An unexpected internal failure.
    #[error("store internal error: {message}")]
    Internal {
        /// Failure description.
        message: String,
    },
}

impl StoreError {
    /// Creates a not-found error.
    pub fn not_found(kind: EntityKind) -> Self {
        Self::NotFound { kind }
    }

    /// Creates an already-exists error.
    pub fn already_exists(kind: EntityKind) -> Self {
        Self::AlreadyExists { kind }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns `true` if this is a business outcome rather than a failure.
    ///
    /// Business outcomes (`NotFound`, `AlreadyExists`) must never trigger
    /// retries or cache invalidation.
    pub fn is_business_outcome(&self) -> bool {
        matches!(
            self,
            StoreError::NotFound { .. } | StoreError::AlreadyExists { .. }
        )
    }

    /// Returns `true` if a retry may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Unavailable { .. })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_outcomes() {
        assert!(StoreError::not_found(EntityKind::Role).is_business_outcome());
        assert!(StoreError::already_exists(EntityKind::User).is_business_outcome());
        assert!(!StoreError::unavailable("down").is_business_outcome());
        assert!(!StoreError::internal("bug").is_business_outcome());
    }

    #[test]
    fn test_retryable() {
        assert!(StoreError::unavailable("timeout").is_retryable());
        assert!(!StoreError::not_found(EntityKind::Permission).is_retryable());
    }

    #[test]
    fn test_display() {
        let err = StoreError::not_found(EntityKind::Role);
        assert_eq!(err.to_string(), "role not found");
    }
}
