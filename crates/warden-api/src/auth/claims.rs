// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! JWT claims structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

/// JWT claims for authentication.
///
/// The token carries identity only: the subject is the user ID. Roles and
/// permissions are resolved from the store on each request, so a role
/// change takes effect without re-issuing tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the user ID rendered as a string.
    pub sub: String,

    /// Expiration time (Unix timestamp).
    pub exp: i64,

    /// Issued at time (Unix timestamp).
    pub iat: i64,

    /// Issuer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

impl Claims {
    /// Creates new claims for a user, expiring `expires_in_secs` from now.
    pub fn new(user_id: i64, expires_in_secs: i64) -> Self {
        let now = Utc::now().timestamp();

        Self {
            sub: user_id.to_string(),
            exp: now + expires_in_secs,
            iat: now,
            iss: None,
        }
    }

    /// Sets the issuer.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.iss = Some(issuer.into());
        self
    }

    /// Parses the subject back into a user ID.
    pub fn user_id(&self) -> ApiResult<i64> {
        self.sub
            .parse()
            .map_err(|_| ApiError::invalid_token(format!("Non-numeric subject: {}", self.sub)))
    }

    /// Returns `true` if the token has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// Returns the expiration time as a DateTime.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

// =============================================================================
// Tests
// =============================================================================
