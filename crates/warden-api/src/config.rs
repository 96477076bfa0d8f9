// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API server configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::auth::JwtConfig;

// =============================================================================
// ApiConfig
// =============================================================================

/// Configuration for the API server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host address.
    pub host: IpAddr,
    /// Server port.
    pub port: u16,
    /// Base path for API endpoints.
    pub base_path: String,
    /// CORS configuration.
    pub cors: CorsConfig,
    /// JWT configuration.
    pub jwt: JwtConfig,
    /// Cache TTL configuration.
    pub cache_ttl: CacheTtlConfig,
    /// Request timeout.
    #[serde(with = "duration_secs")]
    pub request_timeout: Duration,
    /// Graceful shutdown timeout.
    #[serde(with = "duration_secs")]
    pub shutdown_timeout: Duration,
    /// Maximum request body size in bytes.
    pub max_body_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 8080,
            base_path: "/api/v1".to_string(),
            cors: CorsConfig::default(),
            jwt: JwtConfig::default(),
            cache_ttl: CacheTtlConfig::default(),
            request_timeout: Duration::from_secs(30),
            shutdown_timeout: Duration::from_secs(30),
            max_body_size: 1024 * 1024, // 1MB
        }
    }
}

impl ApiConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Sets the host address.
    pub fn with_host(mut self, host: IpAddr) -> Self {
        self.host = host;
        self
    }

    /// Sets the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the JWT configuration.
    pub fn with_jwt(mut self, jwt: JwtConfig) -> Self {
        self.jwt = jwt;
        self
    }
}

// =============================================================================
// CacheTtlConfig
// =============================================================================

/// TTLs for the read-through cache.
///
/// Entity pages tolerate staleness; resolved user permission sets do not,
/// so they live an order of magnitude shorter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheTtlConfig {
    /// TTL for role/permission entity caches.
    #[serde(with = "duration_secs")]
    pub entity: Duration,
    /// TTL for resolved user permission sets.
    #[serde(with = "duration_secs")]
    pub user_permissions: Duration,
}

impl Default for CacheTtlConfig {
    fn default() -> Self {
        Self {
            entity: Duration::from_secs(3600),
            user_permissions: Duration::from_secs(300),
        }
    }
}

// =============================================================================
// CorsConfig
// =============================================================================

/// CORS (Cross-Origin Resource Sharing) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins.
    pub allowed_origins: Vec<String>,
    /// Allowed methods.
    pub allowed_methods: Vec<String>,
    /// Allowed headers.
    pub allowed_headers: Vec<String>,
    /// Max age for preflight cache (seconds).
    pub max_age: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            allowed_methods: vec![
                "GET".to_string(),
                "POST".to_string(),
                "PATCH".to_string(),
                "DELETE".to_string(),
                "OPTIONS".to_string(),
            ],
            allowed_headers: vec![
                "Content-Type".to_string(),
                "Authorization".to_string(),
            ],
            max_age: 3600,
        }
    }
}

// =============================================================================
// duration_secs module for Duration
// =============================================================================

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

// =============================================================================
// Tests
// =============================================================================
