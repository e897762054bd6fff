// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Hello API server
//!
//! Connects to PostgreSQL, applies migrations, then serves the API and the
//! optional health check until Ctrl+C.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, warn};

use hello_api::config::{Cli, Command, RunConfig};
use hello_api::persistence::{PostgresStore, Store};
use hello_api::server;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hello_api=info,tower_http=info".into()),
        )
        .init();

    // Load .env file if present
    if let Err(e) = dotenvy::dotenv() {
        warn!("No .env file loaded: {}", e);
    }

    let cli = Cli::parse();
    match cli.command {
        Command::Run(config) => run(config).await,
    }
}

async fn run(config: RunConfig) -> Result<()> {
    config.validate().map_err(|e| {
        error!("Configuration error: {}", e);
        e
    })?;

    info!(
        api_addr = %config.api_addr(),
        health_check = config.enable_health_check,
        health_addr = %config.health_addr(),
        health_path = %config.health_check_path,
        "Configuration loaded"
    );

    let store = Arc::new(PostgresStore::connect_lazy(
        &config.database_url,
        config.max_connections,
    )?);
    let shutdown_hook = store.initialize().await.map_err(|e| {
        error!("Could not initialize store: {}", e);
        e
    })?;

    let health_handle = if config.enable_health_check {
        let addr = config.health_addr();
        let router = server::health_router(&config.health_check_path);
        Some(tokio::spawn(async move {
            // Aborted after the API server stops.
            if let Err(e) = server::serve(addr, router, std::future::pending()).await {
                error!("Health server error: {}", e);
            }
        }))
    } else {
        None
    };

    let router = server::build_router(store);
    info!("Hello API initialized successfully");

    let served = server::serve(config.api_addr(), router, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {}", e);
        }
        info!("Shutting down...");
    })
    .await;

    if let Some(handle) = health_handle {
        handle.abort();
    }

    shutdown_hook.run().await;

    if let Err(e) = served {
        error!("API server error: {}", e);
        return Err(e.into());
    }

    info!("Shutdown complete");
    Ok(())
}
