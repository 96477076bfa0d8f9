// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Main binary entry point for the warden API server.

use warden_bin::{commands, init_logging, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    init_logging(cli.effective_log_level(), cli.log_format);

    if let Err(e) = commands::execute(cli).await {
        tracing::error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
