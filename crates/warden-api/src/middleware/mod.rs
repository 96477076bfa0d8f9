// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Tower middleware for the API server.

mod auth;

pub use auth::{AuthLayer, AuthMiddleware};
