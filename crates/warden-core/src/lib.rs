// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # warden-core
//!
//! Core abstractions and shared types for the Warden access-control service.
//!
//! This crate provides the foundational pieces used across all Warden
//! components:
//!
//! - **Types**: Domain entities (`User`, `Role`, `Permission`) and their
//!   create/patch payloads
//! - **Registry**: The static universe of permission names known to the
//!   system, built at startup
//! - **Error**: The store-level error hierarchy
//! - **Store**: Narrow async traits over the relational store (`UserStore`,
//!   `RbacStore`)
//! - **Memory**: A thread-safe in-memory reference store for tests and
//!   development
//!
//! ## Example
//!
//! ```rust,ignore
//! use warden_core::{MemoryStore, NewUser, UserStore};
//!
//! let store = MemoryStore::new();
//! let user = store.create_user(NewUser::new("alice", "$2b$12$...")).await?;
//! assert!(user.is_active);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod memory;
pub mod registry;
pub mod store;
pub mod types;

pub use error::{EntityKind, StoreError, StoreResult};
pub use memory::MemoryStore;
pub use registry::{perms, PermissionRegistry};
pub use store::{RbacStore, UserStore};
pub use types::{
    NewPermission, NewRole, NewUser, Permission, PermissionPatch, Role, RolePatch, User,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
