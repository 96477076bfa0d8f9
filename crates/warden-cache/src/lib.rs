// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # warden-cache
//!
//! Read-through caching for warden services.
//!
//! The crate has three layers:
//!
//! - [`CacheKey`] renders deterministic key fingerprints from a namespace,
//!   positional arguments, and sorted keyword arguments.
//! - [`CacheStore`] is the backend seam: byte-oriented get/set/delete with
//!   TTLs and wildcard invalidation. [`MemoryCacheStore`] is the in-process
//!   reference backend.
//! - [`CacheLayer`] is the typed read-through facade used by services. A
//!   broken or unreachable backend degrades to computing fresh values; it
//!   never fails a request.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod key;
pub mod layer;
pub mod store;

pub use error::{CacheError, CacheResult};
pub use key::CacheKey;
pub use layer::CacheLayer;
pub use store::{CacheStore, MemoryCacheStore};

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
