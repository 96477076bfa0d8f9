// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Authorization: permission resolution, checks, and RBAC administration.

mod engine;
mod resolver;
mod service;

pub use engine::AuthorizationEngine;
pub use resolver::PermissionResolver;
pub use service::RbacService;
