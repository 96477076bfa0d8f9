// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! CLI command implementations.
//!
//! This module contains the implementation of all CLI commands:
//!
//! - `run`: Start the API server
//! - `validate`: Validate configuration file
//! - `version`: Show version information

mod run;
mod validate;
mod version;

pub use run::run;
pub use validate::validate;
pub use version::version;

use std::path::Path;

use warden_api::ApiConfig;

use crate::cli::{Cli, Commands};
use crate::error::{BinError, BinResult};

/// Executes the appropriate command based on CLI arguments.
pub async fn execute(cli: Cli) -> BinResult<()> {
    match cli.effective_command() {
        Commands::Run(args) => run::run(&cli, args).await,
        Commands::Validate(args) => validate::validate(&cli, args),
        Commands::Version => version::version(&cli),
    }
}

/// Loads the API configuration from a JSON file.
pub(crate) fn load_config(path: &Path) -> BinResult<ApiConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        BinError::config(format!("Failed to read {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&contents).map_err(|e| {
        BinError::config(format!("Failed to parse {}: {}", path.display(), e))
    })
}
