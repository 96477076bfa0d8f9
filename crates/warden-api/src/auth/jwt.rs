// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! JWT token management.

use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::Claims;
use crate::error::{ApiError, ApiResult};

// =============================================================================
// JwtConfig
// =============================================================================

/// JWT configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JwtConfig {
    /// Secret key for signing tokens.
    #[serde(skip_serializing)]
    pub secret: String,
    /// Token issuer.
    pub issuer: String,
    /// Token expiration time in seconds.
    pub expiration_secs: i64,
    /// Whether to validate the issuer.
    pub validate_issuer: bool,
    /// Clock skew tolerance in seconds.
    pub leeway_secs: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(), // Must be set by user
            issuer: "warden".to_string(),
            expiration_secs: 1800, // 30 minutes
            validate_issuer: true,
            leeway_secs: 60,
        }
    }
}

impl JwtConfig {
    /// Creates a new configuration with the given secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Sets the issuer.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// Sets the expiration time.
    pub fn with_expiration(mut self, duration: Duration) -> Self {
        self.expiration_secs = duration.as_secs() as i64;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ApiResult<()> {
        if self.secret.is_empty() {
            return Err(ApiError::internal("JWT secret is not configured"));
        }
        if self.secret.len() < 32 {
            tracing::warn!("JWT secret is shorter than recommended (32 bytes)");
        }
        Ok(())
    }
}

// =============================================================================
// JwtManager
// =============================================================================

/// Manager for JWT token operations.
///
/// Tokens are signed with HS256. Every verification failure, whatever its
/// cause, maps to the same invalid-token outcome so a caller cannot probe
/// why a forged or stale token was rejected.
#[derive(Clone)]
pub struct JwtManager {
    config: Arc<JwtConfig>,
    encoding_key: Arc<EncodingKey>,
    decoding_key: Arc<DecodingKey>,
    validation: Arc<Validation>,
}

impl JwtManager {
    /// Creates a new JWT manager with the given configuration.
    pub fn new(config: JwtConfig) -> ApiResult<Self> {
        config.validate()?;

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.leeway_secs;
        validation.validate_aud = false;
        if config.validate_issuer {
            validation.set_issuer(&[&config.issuer]);
        }

        Ok(Self {
            config: Arc::new(config),
            encoding_key: Arc::new(encoding_key),
            decoding_key: Arc::new(decoding_key),
            validation: Arc::new(validation),
        })
    }

    /// Creates a signed access token for a user.
    pub fn create_access_token(&self, user_id: i64) -> ApiResult<String> {
        let claims =
            Claims::new(user_id, self.config.expiration_secs).with_issuer(&self.config.issuer);

        self.create_token(&claims)
    }

    /// Signs arbitrary claims. Exposed for tests that need expired tokens.
    pub fn create_token(&self, claims: &Claims) -> ApiResult<String> {
        let header = Header::new(Algorithm::HS256);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| ApiError::internal(format!("Failed to create token: {}", e)))
    }

    /// Validates a token and returns its claims.
    pub fn validate_token(&self, token: &str) -> ApiResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token validation failed");
                ApiError::invalid_token(e.to_string())
            })
    }

    /// Validates a token and returns the user ID it identifies.
    pub fn verify_user_id(&self, token: &str) -> ApiResult<i64> {
        self.validate_token(token)?.user_id()
    }

    /// Returns the token expiration time in seconds.
    pub fn expiration_secs(&self) -> i64 {
        self.config.expiration_secs
    }
}

impl std::fmt::Debug for JwtManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtManager")
            .field("issuer", &self.config.issuer)
            .field("expiration_secs", &self.config.expiration_secs)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig::new("test-secret-key-that-is-long-enough-for-testing")
    }

    #[test]
    fn test_create_and_validate_token() {
        let manager = JwtManager::new(test_config()).unwrap();

        let token = manager.create_access_token(123).unwrap();
        let user_id = manager.verify_user_id(&token).unwrap();

        assert_eq!(user_id, 123);
    }

    #[test]
    fn test_empty_secret_rejected() {
        let result = JwtManager::new(JwtConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_expired_token() {
        let manager = JwtManager::new(JwtConfig {
            leeway_secs: 0,
            ..test_config()
        })
        .unwrap();

        let claims = Claims::new(1, -3600).with_issuer("warden");
        let token = manager.create_token(&claims).unwrap();

        let err = manager.validate_token(&token).unwrap_err();
        assert!(matches!(err, ApiError::InvalidToken { .. }));
    }

    #[test]
    fn test_garbage_token() {
        let manager = JwtManager::new(test_config()).unwrap();

        let err = manager.validate_token("invalid.token.here").unwrap_err();
        assert!(matches!(err, ApiError::InvalidToken { .. }));
    }

    #[test]
    fn test_wrong_secret() {
        let manager1 = JwtManager::new(JwtConfig::new("secret-one-for-testing-purposes")).unwrap();
        let manager2 = JwtManager::new(JwtConfig::new("secret-two-for-testing-purposes")).unwrap();

        let token = manager1.create_access_token(1).unwrap();

        // Forged and expired tokens get the same uniform rejection.
        let err = manager2.validate_token(&token).unwrap_err();
        assert!(matches!(err, ApiError::InvalidToken { .. }));
    }

    #[test]
    fn test_tampered_token() {
        let manager = JwtManager::new(test_config()).unwrap();

        let mut token = manager.create_access_token(1).unwrap();
        token.pop();
        token.push('x');

        assert!(manager.validate_token(&token).is_err());
    }
}
