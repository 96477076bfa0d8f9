// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! CLI argument parsing and command definitions.
//!
//! This module provides the command-line interface for warden using clap.
//! It supports multiple subcommands:
//!
//! - `run`: Start the API server (default)
//! - `validate`: Validate configuration file
//! - `version`: Show version information

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

// =============================================================================
// Main CLI Structure
// =============================================================================

/// warden - JWT-authenticated API server with role-based access control.
#[derive(Parser, Debug)]
#[command(
    name = "warden",
    author = "Sylvex <contact@sylvex.io>",
    version = crate::VERSION,
    about = "JWT-authenticated API server with role-based access control",
    long_about = None,
    propagate_version = true
)]
pub struct Cli {
    /// Configuration file path
    #[arg(
        short,
        long,
        default_value = "warden.json",
        env = "WARDEN_CONFIG",
        global = true
    )]
    pub config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        short,
        long,
        default_value = "info",
        env = "WARDEN_LOG_LEVEL",
        global = true
    )]
    pub log_level: String,

    /// Log format (text, json)
    #[arg(long, default_value = "text", env = "WARDEN_LOG_FORMAT", global = true)]
    pub log_format: LogFormat,

    /// Enable quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// =============================================================================
// Subcommands
// =============================================================================

/// Available subcommands for the warden CLI.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the API server
    ///
    /// This is the default command when no subcommand is specified.
    Run(RunArgs),

    /// Validate the configuration file
    ///
    /// Parses and validates the configuration file without starting the
    /// server. Useful for checking configuration before deployment.
    Validate(ValidateArgs),

    /// Show detailed version information
    Version,
}

// =============================================================================
// Command Arguments
// =============================================================================

/// Arguments for the `run` command.
#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    /// Override the configured port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// JWT signing secret
    #[arg(long, env = "WARDEN_JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: Option<String>,

    /// Skip seeding the built-in permission registry into the store
    #[arg(long)]
    pub skip_seed: bool,
}

/// Arguments for the `validate` command.
#[derive(Args, Debug, Default, Clone)]
pub struct ValidateArgs {
    /// Show parsed configuration after validation
    #[arg(short, long)]
    pub show_config: bool,
}

// =============================================================================
// Enums
// =============================================================================

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON format for structured logging
    Json,
}

// =============================================================================
// Helper Methods
// =============================================================================

impl Cli {
    /// Parse CLI arguments from the command line.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective command, defaulting to `Run` if none specified.
    pub fn effective_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Run(RunArgs::default()))
    }

    /// Get the effective log level based on flags.
    pub fn effective_log_level(&self) -> &str {
        if self.quiet {
            "warn"
        } else if self.verbose {
            "debug"
        } else {
            &self.log_level
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
