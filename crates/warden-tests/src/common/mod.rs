// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Common Test Utilities
//!
//! Shared test utilities, fixtures, and the in-memory HTTP harness.
//!
//! ## Module Structure
//!
//! - `fixtures`: Pre-built test data and configurations
//! - `harness`: In-memory application harness driving the full router

pub mod fixtures;
pub mod harness;

pub use fixtures::*;
pub use harness::*;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Initialize test logging. Call this at the start of each test module.
pub fn init_test_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("warn,warden=debug")),
            )
            .with_test_writer()
            .init();
    });
}

static USERNAME_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generates a unique username for test isolation.
pub fn unique_username(prefix: &str) -> String {
    let n = USERNAME_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}", prefix, n)
}
