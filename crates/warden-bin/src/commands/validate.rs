// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `validate` command.

use crate::cli::{Cli, ValidateArgs};
use crate::error::{BinError, BinResult};

/// Executes the `validate` command to validate configuration.
pub fn validate(cli: &Cli, args: ValidateArgs) -> BinResult<()> {
    let config_path = &cli.config;

    if !config_path.exists() {
        return Err(BinError::config(format!(
            "Configuration file not found: {}",
            config_path.display()
        )));
    }

    let config = super::load_config(config_path)?;

    // Collect validation warnings
    let mut warnings: Vec<String> = Vec::new();

    if config.jwt.secret.is_empty() {
        warnings.push(
            "JWT secret is not configured; the server will refuse to start".to_string(),
        );
    } else if config.jwt.secret.len() < 32 {
        warnings.push("JWT secret is shorter than recommended (32 bytes)".to_string());
    }

    if config.cors.allowed_origins.iter().any(|o| o == "*") {
        warnings.push("CORS allows all origins".to_string());
    }

    println!("✓ Configuration is valid: {}", config_path.display());
    println!();
    println!("Summary:");
    println!("  Bind address: {}:{}", config.host, config.port);
    println!("  Base path:    {}", config.base_path);
    println!("  JWT issuer:   {}", config.jwt.issuer);
    println!("  Token TTL:    {}s", config.jwt.expiration_secs);
    println!("  Entity cache: {}s", config.cache_ttl.entity.as_secs());
    println!(
        "  Perm cache:   {}s",
        config.cache_ttl.user_permissions.as_secs()
    );

    if !warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &warnings {
            println!("  ⚠ {}", warning);
        }
    }

    if args.show_config {
        println!();
        println!("Parsed configuration:");
        // The JWT secret is skipped during serialization so this is safe
        // to print.
        println!(
            "{}",
            serde_json::to_string_pretty(&config)
                .unwrap_or_else(|_| "(serialization error)".to_string())
        );
    }

    Ok(())
}
