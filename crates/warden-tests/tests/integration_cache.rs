// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Cache Integration Tests
//!
//! Integration tests for the caching layer:
//!
//! - Deterministic key rendering
//! - Read-through computation and hits
//! - Wildcard invalidation and idempotency
//! - Degraded-backend behavior
//!
//! ## Test Categories
//!
//! - `test_key_*`: Key fingerprint tests
//! - `test_layer_*`: Read-through layer tests
//! - `test_invalidate_*`: Invalidation tests

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use warden_cache::{CacheKey, CacheLayer, CacheStore, MemoryCacheStore};

const TTL: Duration = Duration::from_secs(60);

fn layer() -> (CacheLayer, Arc<MemoryCacheStore>) {
    let store = Arc::new(MemoryCacheStore::new());
    (CacheLayer::new(store.clone()), store)
}

// =============================================================================
// Key Tests
// =============================================================================

#[test]
fn test_key_kwargs_render_sorted_regardless_of_insertion() {
    let a = CacheKey::new("roles").kwarg("skip", 0).kwarg("limit", 100);
    let b = CacheKey::new("roles").kwarg("limit", 100).kwarg("skip", 0);
    assert_eq!(a.render(), b.render());
    assert_eq!(a.render(), "roles:limit:100:skip:0");
}

#[test]
fn test_key_args_precede_kwargs() {
    let key = CacheKey::new("role").arg(7).kwarg("depth", 2);
    assert_eq!(key.render(), "role:7:depth:2");
}

// =============================================================================
// Read-Through Tests
// =============================================================================

#[tokio::test]
async fn test_layer_second_read_is_a_hit() {
    let (layer, _) = layer();
    let key = CacheKey::new("widget").arg(1);
    let calls = AtomicU32::new(0);

    for _ in 0..3 {
        let value: Result<u64, std::convert::Infallible> = layer
            .get_or_compute(&key, TTL, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(42)
            })
            .await;
        assert_eq!(value.unwrap(), 42);
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_layer_compute_error_is_not_cached() {
    let (layer, store) = layer();
    let key = CacheKey::new("widget").arg(2);

    let result: Result<u64, &str> = layer
        .get_or_compute(&key, TTL, || async { Err("store down") })
        .await;
    assert_eq!(result.unwrap_err(), "store down");
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_layer_expired_entry_recomputes() {
    let (layer, _) = layer();
    let key = CacheKey::new("widget").arg(3);
    let calls = AtomicU32::new(0);

    let compute = || async {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok::<u64, std::convert::Infallible>(7)
    };

    layer
        .get_or_compute(&key, Duration::from_millis(10), compute)
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(30)).await;
    layer
        .get_or_compute(&key, Duration::from_millis(10), compute)
        .await
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_layer_garbage_entry_falls_back_to_compute() {
    let (layer, store) = layer();
    let key = CacheKey::new("widget").arg(4);

    store
        .set(&key.render(), b"\x00not a payload".to_vec(), TTL)
        .await
        .unwrap();

    let value: Result<String, std::convert::Infallible> = layer
        .get_or_compute(&key, TTL, || async { Ok("fresh".to_string()) })
        .await;
    assert_eq!(value.unwrap(), "fresh");
}

// =============================================================================
// Invalidation Tests
// =============================================================================

#[tokio::test]
async fn test_invalidate_wildcard_scopes_to_namespace() {
    let (layer, store) = layer();

    for id in 0..3 {
        let key = CacheKey::new("role").arg(id);
        layer
            .get_or_compute(&key, TTL, || async {
                Ok::<u64, std::convert::Infallible>(id)
            })
            .await
            .unwrap();
    }
    let other = CacheKey::new("permission").arg(1);
    layer
        .get_or_compute(&other, TTL, || async {
            Ok::<u64, std::convert::Infallible>(9)
        })
        .await
        .unwrap();

    let removed = layer.invalidate("role:*").await;
    assert_eq!(removed, 3);
    assert_eq!(store.len(), 1);
    assert!(store.keys().contains(&"permission:1".to_string()));
}

#[tokio::test]
async fn test_invalidate_is_idempotent() {
    let (layer, _) = layer();
    assert_eq!(layer.invalidate("nothing:*").await, 0);
    assert_eq!(layer.invalidate("nothing:*").await, 0);
}
