// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Cache error types.

use thiserror::Error;

/// Result alias for cache backend operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Errors a cache backend can report.
///
/// These surface only at the [`crate::CacheStore`] seam. The read-through
/// [`crate::CacheLayer`] absorbs them and falls back to computing fresh
/// values, so callers above the layer never see a cache failure.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The backend could not be reached.
    #[error("Cache backend unavailable: {message}")]
    Unavailable {
        /// What went wrong.
        message: String,
    },

    /// A stored value could not be encoded or decoded.
    #[error("Cache codec failure: {message}")]
    Codec {
        /// What went wrong.
        message: String,
    },

    /// An invalidation pattern could not be compiled.
    #[error("Invalid cache pattern '{pattern}': {message}")]
    Pattern {
        /// The offending pattern.
        pattern: String,
        /// What went wrong.
        message: String,
    },
}

impl CacheError {
    /// Creates an `Unavailable` error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a `Codec` error.
    pub fn codec(message: impl Into<String>) -> Self {
        Self::Codec {
            message: message.into(),
        }
    }

    /// Creates a `Pattern` error.
    pub fn pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}
