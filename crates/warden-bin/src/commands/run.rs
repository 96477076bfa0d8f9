// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `run` command.

use std::sync::Arc;

use tracing::{info, warn};
use warden_api::{ApiConfig, ApiServer, AppState};
use warden_core::{MemoryStore, NewPermission, PermissionRegistry, RbacStore, StoreError};

use crate::cli::{Cli, RunArgs};
use crate::error::{BinError, BinResult};
use crate::shutdown::ShutdownCoordinator;

/// Executes the `run` command to start the API server.
pub async fn run(cli: &Cli, args: RunArgs) -> BinResult<()> {
    info!("Starting warden API server...");

    let mut config = if cli.config.exists() {
        let config = super::load_config(&cli.config)?;
        info!(path = %cli.config.display(), "Loaded configuration");
        config
    } else {
        info!(
            path = %cli.config.display(),
            "Configuration file not found, using defaults"
        );
        ApiConfig::default()
    };

    // CLI overrides take precedence over the config file.
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(secret) = args.jwt_secret {
        config.jwt.secret = secret;
    }

    if config.jwt.secret.is_empty() {
        return Err(BinError::config(
            "JWT secret is not configured; set it in the config file or via --jwt-secret",
        ));
    }

    let store = Arc::new(MemoryStore::new());
    let registry = Arc::new(PermissionRegistry::builtin());

    if args.skip_seed {
        info!("Skipping permission registry seed");
    } else {
        seed_permissions(store.as_ref(), &registry).await?;
    }

    let state = AppState::builder()
        .config(config)
        .store(store)
        .registry(registry)
        .build()?;

    let coordinator = ShutdownCoordinator::new();
    let signal = coordinator.shutdown_signal();

    let signal_coordinator = coordinator.clone();
    tokio::spawn(async move {
        signal_coordinator.wait_for_signal().await;
    });

    ApiServer::new(state).run_with_shutdown(signal).await?;

    Ok(())
}

/// Seeds the built-in permission registry into the store.
///
/// Already-present permissions are left untouched so restarts are
/// idempotent.
async fn seed_permissions(
    store: &dyn RbacStore,
    registry: &PermissionRegistry,
) -> BinResult<()> {
    let mut created = 0u32;
    for name in registry.iter() {
        match store.create_permission(NewPermission::new(name)).await {
            Ok(_) => created += 1,
            Err(StoreError::AlreadyExists { .. }) => {}
            Err(e) => {
                warn!(permission = name, error = %e, "Failed to seed permission");
                return Err(e.into());
            }
        }
    }
    info!(created, total = registry.len(), "Seeded permission registry");
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
