// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Warden Integration Tests
//!
//! This crate provides integration tests for the warden authorization
//! service. It includes test utilities, fixtures, and an in-memory HTTP
//! harness.
//!
//! ## Module Structure
//!
//! - [`common`]: Shared test utilities and helpers
//!   - `fixtures`: Pre-built test data for consistent testing
//!   - `harness`: In-memory application harness driving the full router
//!
//! ## Running Tests
//!
//! ```bash
//! # Run all integration tests
//! cargo test -p warden-tests
//!
//! # Run specific test suite
//! cargo test -p warden-tests --test integration_auth
//! cargo test -p warden-tests --test integration_rbac
//! cargo test -p warden-tests --test integration_cache
//! cargo test -p warden-tests --test integration_http
//! ```
//!
//! ## Test Categories
//!
//! ### Auth Tests (`integration_auth.rs`)
//! - Password hashing and verification
//! - JWT issuance, validation, expiry, and tampering
//! - Registration and login flows
//!
//! ### RBAC Tests (`integration_rbac.rs`)
//! - Permission resolution across roles
//! - Superuser override
//! - Conjunctive authorization
//!
//! ### Cache Tests (`integration_cache.rs`)
//! - Key determinism
//! - Read-through behavior and invalidation
//!
//! ### HTTP Tests (`integration_http.rs`)
//! - Full request flows through the router: register, login, CRUD,
//!   role assignment, and authorization failures

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod common;

/// Re-export commonly used items for convenience.
pub mod prelude {
    pub use crate::common::fixtures::*;
    pub use crate::common::harness::*;
    pub use crate::common::{init_test_logging, unique_username};
}
