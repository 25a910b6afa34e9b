// ABOUTME: Muscledia AI service binary serving recommendations and Q&A over HTTP
// ABOUTME: Loads environment configuration, initializes logging, and runs the axum server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Muscledia

#![recursion_limit = "256"]

//! # Muscledia AI Service Binary

use std::future;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use muscledia_ai_service::{
    catalog::{CatalogSource, JsonFileCatalog},
    config::ServiceConfig,
    logging,
    routes::{build_router, ServiceResources},
};
use tokio::{net::TcpListener, signal};
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "muscledia-ai-service")]
#[command(about = "Muscledia AI - workout routine recommendations from a local LLM")]
pub struct Args {
    /// Override HTTP port
    #[arg(long, env = "HTTP_PORT")]
    http_port: Option<u16>,

    /// Override the routine catalog JSON file
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServiceConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(catalog) = args.catalog {
        config.catalog.path = catalog;
    }
    config.validate()?;

    logging::init_from_env()?;

    info!("Starting Muscledia AI service");
    info!("{}", config.summary());

    check_catalog(&JsonFileCatalog::new(&config.catalog.path)).await;

    let resources = Arc::new(ServiceResources::from_config(&config)?);
    let app = build_router(resources, &config.cors_origins);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Listening on {addr}");
    info!("  POST /ollama/getRecommendation");
    info!("  POST /ollama/postConversationWithModel");
    info!("  GET  /health, /ready");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {e}");
        return Err(e.into());
    }

    info!("Server stopped");
    Ok(())
}

/// Load the catalog once at startup so a bad file shows up in the logs early
async fn check_catalog(catalog: &JsonFileCatalog) {
    match catalog.load_routines().await {
        Ok(routines) if routines.is_empty() => {
            warn!(path = %catalog.path().display(), "Routine catalog is empty");
        }
        Ok(routines) => {
            info!(count = routines.len(), path = %catalog.path().display(), "Routine catalog loaded");
        }
        Err(e) => {
            warn!("Routine catalog unavailable, recommendations will fail: {e}");
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
        future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
