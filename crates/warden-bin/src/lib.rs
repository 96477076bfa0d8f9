// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # warden-bin
//!
//! CLI binary for the warden authorization service.
//!
//! This crate provides the main binary entry point, including:
//!
//! - CLI argument parsing with clap
//! - Logging initialization
//! - Graceful shutdown handling
//! - Command implementations (run, validate, version)

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod shutdown;

pub use cli::{Cli, Commands};
pub use error::{BinError, BinResult};
pub use logging::init_logging;
pub use shutdown::ShutdownCoordinator;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
