// ABOUTME: Server binary: loads configuration, opens the database, and serves the web app
// ABOUTME: Command-line flags override the port and database location from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Apelog Server Binary
//!
//! Starts the training log web application on a single `SQLite` database.

use anyhow::Result;
use apelog::{
    config::{DatabaseUrl, ServerConfig},
    logging,
    resources::ServerResources,
    server::ApelogServer,
};
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "apelog-server")]
#[command(about = "Apelog - strength training log and volume dashboard")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database location (`sqlite:./data/apelog.db`, `sqlite::memory:`)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url.as_deref() {
        config.database.url = DatabaseUrl::parse_url(database_url);
    }

    info!("Starting apelog");
    info!("{}", config.summary());

    let resources = Arc::new(ServerResources::connect(config).await?);
    let server = ApelogServer::new(resources);

    if let Err(e) = server.run().await {
        error!("Server error: {e}");
        return Err(e.into());
    }

    Ok(())
}
