// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Password hashing and verification.
//!
//! Uses bcrypt with a per-hash random salt. Hashing the same password twice
//! yields different strings; verification goes through [`verify_password`],
//! never string comparison.

use crate::error::{ApiError, ApiResult};

/// Hashes a plaintext password with bcrypt.
pub fn hash_password(plain: &str) -> ApiResult<String> {
    bcrypt::hash(plain, bcrypt::DEFAULT_COST)
        .map_err(|e| ApiError::internal(format!("Password hashing failed: {}", e)))
}

/// Verifies a plaintext password against a stored hash.
///
/// Returns `false` for a mismatch and for a malformed hash. A corrupt
/// stored hash must read as "wrong password", not as a server error.
pub fn verify_password(plain: &str, hash: &str) -> bool {
    bcrypt::verify(plain, hash).unwrap_or(false)
}

// =============================================================================
// Tests
// =============================================================================
