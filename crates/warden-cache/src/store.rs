// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Cache backend seam.
//!
//! [`CacheStore`] is byte-oriented: encoding policy lives in the layer
//! above, so a backend only moves opaque values with TTLs. Wildcard
//! deletion takes a glob pattern (`user_permissions:*`) and reports how
//! many entries it removed.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use globset::Glob;
use parking_lot::RwLock;

use crate::error::{CacheError, CacheResult};

// =============================================================================
// CacheStore trait
// =============================================================================

/// A byte-oriented cache backend with TTLs and glob invalidation.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Fetches the value under `key`, or `None` on a miss or expiry.
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>>;

    /// Stores `value` under `key` for at most `ttl`.
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> CacheResult<()>;

    /// Removes a single key. Returns `true` if an entry existed.
    async fn delete(&self, key: &str) -> CacheResult<bool>;

    /// Removes every key matching the glob `pattern` and returns the count.
    ///
    /// A pattern with no matches is a successful no-op returning `0`.
    async fn delete_matching(&self, pattern: &str) -> CacheResult<u64>;
}

// =============================================================================
// MemoryCacheStore
// =============================================================================

struct Entry {
    value: Vec<u8>,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// An in-process cache backend.
///
/// Expiry is lazy: entries past their deadline are dropped when touched by
/// a read or a wildcard scan, not by a background sweeper.
///
/// # Thread Safety
///
/// All state sits behind a single `parking_lot::RwLock`, so the store is
/// `Send + Sync` and safe to share behind an `Arc`.
#[derive(Default)]
pub struct MemoryCacheStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryCacheStore {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the live (unexpired) keys, unordered. Test helper.
    pub fn keys(&self) -> Vec<String> {
        let now = Instant::now();
        self.entries
            .read()
            .iter()
            .filter(|(_, e)| !e.is_expired(now))
            .map(|(k, _)| k.clone())
            .collect()
    }

    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .values()
            .filter(|e| !e.is_expired(now))
            .count()
    }

    /// Returns `true` if no live entries remain.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        let now = Instant::now();

        {
            let entries = self.entries.read();
            match entries.get(key) {
                Some(entry) if !entry.is_expired(now) => {
                    return Ok(Some(entry.value.clone()));
                }
                Some(_) => {}
                None => return Ok(None),
            }
        }

        // Expired entry: upgrade to a write lock and drop it.
        self.entries.write().remove(key);
        Ok(None)
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> CacheResult<()> {
        let entry = Entry {
            value,
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<bool> {
        Ok(self.entries.write().remove(key).is_some())
    }

    async fn delete_matching(&self, pattern: &str) -> CacheResult<u64> {
        let matcher = Glob::new(pattern)
            .map_err(|e| CacheError::pattern(pattern, e.to_string()))?
            .compile_matcher();

        let now = Instant::now();
        let mut entries = self.entries.write();
        // Expired entries purged here are garbage collection, not matches;
        // only live matching keys count toward the removal total.
        let mut removed = 0u64;
        entries.retain(|key, entry| {
            if entry.is_expired(now) {
                return false;
            }
            if matcher.is_match(key) {
                removed += 1;
                return false;
            }
            true
        });
        Ok(removed)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_roundtrip() {
        let store = MemoryCacheStore::new();
        store
            .set("role:1", b"payload".to_vec(), Duration::from_secs(60))
            .await
            .unwrap();

        let got = store.get("role:1").await.unwrap();
        assert_eq!(got.as_deref(), Some(b"payload".as_slice()));
    }

    #[tokio::test]
    async fn test_expired_entry_is_a_miss() {
        let store = MemoryCacheStore::new();
        store
            .set("role:1", b"payload".to_vec(), Duration::ZERO)
            .await
            .unwrap();

        assert!(store.get("role:1").await.unwrap().is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_delete_matching_scopes_to_pattern() {
        let store = MemoryCacheStore::new();
        let ttl = Duration::from_secs(60);
        store.set("roles:limit:100:skip:0", vec![1], ttl).await.unwrap();
        store.set("role:7", vec![2], ttl).await.unwrap();
        store.set("user_permissions:42", vec![3], ttl).await.unwrap();

        let removed = store.delete_matching("user_permissions:*").await.unwrap();
        assert_eq!(removed, 1);
        assert!(store.get("role:7").await.unwrap().is_some());
        assert!(store.get("roles:limit:100:skip:0").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_matching_no_hits_is_zero() {
        let store = MemoryCacheStore::new();
        let removed = store.delete_matching("nothing:*").await.unwrap();
        assert_eq!(removed, 0);
    }

    #[tokio::test]
    async fn test_delete_matching_ignores_expired_non_matches() {
        let store = MemoryCacheStore::new();
        store.set("role:7", vec![1], Duration::ZERO).await.unwrap();

        let removed = store.delete_matching("user_permissions:*").await.unwrap();
        assert_eq!(removed, 0);
        // The expired entry is still purged.
        assert!(store.entries.read().is_empty());
    }

    #[tokio::test]
    async fn test_delete_matching_bad_pattern() {
        let store = MemoryCacheStore::new();
        let err = store.delete_matching("roles:[").await.unwrap_err();
        assert!(matches!(err, CacheError::Pattern { .. }));
    }
}
