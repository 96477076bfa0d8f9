// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # warden-api
//!
//! HTTP API server with JWT authentication and role-based access control.
//!
//! The crate is organized around three pillars:
//!
//! - [`auth`] covers credentials: bcrypt password hashing, JWT issuance and
//!   verification, and the registration/login service.
//! - [`rbac`] covers authorization: the cached permission resolver, the
//!   conjunctive authorization engine, and the role/permission admin
//!   services.
//! - [`server`] wires handlers, middleware, and shared state into an Axum
//!   router with graceful shutdown.
//!
//! # Example
//!
//! ```rust,ignore
//! use warden_api::{ApiConfig, ApiServer, AppState};
//!
//! let state = AppState::builder().config(config).store(store).build()?;
//! ApiServer::new(state).run().await?;
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod rbac;
pub mod response;
pub mod server;
pub mod state;

pub use auth::{AuthContext, AuthService, Claims, JwtConfig, JwtManager};
pub use config::{ApiConfig, CacheTtlConfig};
pub use error::{ApiError, ApiResult};
pub use rbac::{AuthorizationEngine, PermissionResolver, RbacService};
pub use server::ApiServer;
pub use state::AppState;

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
