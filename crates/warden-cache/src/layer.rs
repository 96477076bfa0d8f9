// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Typed read-through facade over a [`CacheStore`].
//!
//! The layer is deliberately forgiving: a backend error, an undecodable
//! entry, or an unencodable value all degrade to computing the fresh value
//! and moving on. Cache trouble is logged, never propagated.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::key::CacheKey;
use crate::store::CacheStore;

// =============================================================================
// CacheLayer
// =============================================================================

/// Read-through cache shared by the service layer.
#[derive(Clone)]
pub struct CacheLayer {
    store: Arc<dyn CacheStore>,
}

impl CacheLayer {
    /// Wraps a backend.
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Returns the cached value under `key`, or runs `compute`, caches its
    /// result for `ttl`, and returns it.
    ///
    /// Values are encoded with bincode; entries written by an older build
    /// may decode via the JSON fallback instead. An entry that decodes with
    /// neither codec is treated as a miss and overwritten.
    ///
    /// Only `compute` errors propagate. Cache failures are absorbed.
    pub async fn get_or_compute<T, E, F, Fut>(
        &self,
        key: &CacheKey,
        ttl: Duration,
        compute: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let rendered = key.render();

        match self.store.get(&rendered).await {
            Ok(Some(bytes)) => {
                if let Some(value) = decode::<T>(&bytes) {
                    debug!(key = %rendered, "Cache hit");
                    return Ok(value);
                }
                warn!(key = %rendered, "Undecodable cache entry, recomputing");
            }
            Ok(None) => {
                debug!(key = %rendered, "Cache miss");
            }
            Err(e) => {
                warn!(key = %rendered, error = %e, "Cache read failed, computing fresh value");
            }
        }

        let value = compute().await?;

        match encode(&value) {
            Some(bytes) => {
                if let Err(e) = self.store.set(&rendered, bytes, ttl).await {
                    warn!(key = %rendered, error = %e, "Cache write failed");
                }
            }
            None => {
                warn!(key = %rendered, "Value not cacheable, skipping write");
            }
        }

        Ok(value)
    }

    /// Removes the single entry under `key`.
    pub async fn evict(&self, key: &CacheKey) {
        let rendered = key.render();
        if let Err(e) = self.store.delete(&rendered).await {
            warn!(key = %rendered, error = %e, "Cache evict failed");
        }
    }

    /// Removes every entry matching the glob `pattern` and returns the
    /// count. Backend failures are absorbed and count as zero removals.
    pub async fn invalidate(&self, pattern: &str) -> u64 {
        match self.store.delete_matching(pattern).await {
            Ok(removed) => {
                debug!(pattern = %pattern, removed, "Cache invalidated");
                removed
            }
            Err(e) => {
                warn!(pattern = %pattern, error = %e, "Cache invalidation failed");
                0
            }
        }
    }
}

fn encode<T: Serialize>(value: &T) -> Option<Vec<u8>> {
    match bincode::serialize(value) {
        Ok(bytes) => Some(bytes),
        Err(_) => serde_json::to_vec(value).ok(),
    }
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Option<T> {
    bincode::deserialize(bytes)
        .ok()
        .or_else(|| serde_json::from_slice(bytes).ok())
}

// =============================================================================
// Tests
// =============================================================================
