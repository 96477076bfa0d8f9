// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Deterministic cache key fingerprints.
//!
//! A key is a namespace followed by positional arguments and keyword
//! arguments, joined with `:`. Keyword arguments are sorted by name before
//! rendering, so two call sites passing the same logical inputs always
//! produce the same fingerprint regardless of insertion order.
//!
//! ```text
//! roles:skip=0 limit=100  ->  "roles:limit:100:skip:0"
//! user_permissions(42)    ->  "user_permissions:42"
//! ```

use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// CacheKey
// =============================================================================

/// Builder for a deterministic cache key fingerprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey {
    namespace: String,
    args: Vec<String>,
    kwargs: BTreeMap<String, String>,
}

impl CacheKey {
    /// Creates a key in the given namespace.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            args: Vec::new(),
            kwargs: BTreeMap::new(),
        }
    }

    /// Appends a positional argument.
    pub fn arg(mut self, value: impl fmt::Display) -> Self {
        self.args.push(value.to_string());
        self
    }

    /// Adds a keyword argument. Keyword arguments render after positional
    /// ones, sorted by name.
    pub fn kwarg(mut self, name: impl Into<String>, value: impl fmt::Display) -> Self {
        self.kwargs.insert(name.into(), value.to_string());
        self
    }

    /// Returns the key's namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Renders the fingerprint: `namespace[:arg]*[:name:value]*`.
    pub fn render(&self) -> String {
        let mut parts = Vec::with_capacity(1 + self.args.len() + self.kwargs.len() * 2);
        parts.push(self.namespace.clone());
        parts.extend(self.args.iter().cloned());
        for (name, value) in &self.kwargs {
            parts.push(name.clone());
            parts.push(value.clone());
        }
        parts.join(":")
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

// =============================================================================
// Tests
// =============================================================================
