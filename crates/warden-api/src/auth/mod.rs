// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Authentication: password hashing, JWT tokens, and the login service.

mod claims;
mod context;
mod jwt;
mod password;
mod service;

pub use claims::Claims;
pub use context::AuthContext;
pub use jwt::{JwtConfig, JwtManager};
pub use password::{hash_password, verify_password};
pub use service::{AuthService, Registration};
