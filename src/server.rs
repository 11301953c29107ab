// ABOUTME: HTTP server lifecycle: bind, serve, and shut down gracefully
// ABOUTME: Logs the endpoint listing at startup and drains in-flight requests on Ctrl-C or SIGTERM
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use crate::resources::ServerResources;
use crate::routes;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// The apelog web server
pub struct ApelogServer {
    resources: Arc<ServerResources>,
}

impl ApelogServer {
    /// Create a server around shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Bind the configured address and serve until a shutdown signal arrives
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound or the server fails
    pub async fn run(self) -> AppResult<()> {
        let config = &self.resources.config;
        let addr = format!("{}:{}", config.host, config.http_port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

        display_available_endpoints(&config.host, config.http_port);
        info!("HTTP server listening on http://{addr}");

        let app = routes::router(&self.resources);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| AppError::internal(format!("HTTP server error: {e}")))?;

        info!("HTTP server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl-C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}

/// Display all available endpoints
fn display_available_endpoints(host: &str, port: u16) {
    info!("=== Available Endpoints ===");
    display_page_endpoints(host, port);
    display_program_endpoints(host, port);
    display_dashboard_endpoints(host, port);
    info!("=== End of Endpoint List ===");
}

#[allow(clippy::cognitive_complexity)]
fn display_page_endpoints(host: &str, port: u16) {
    info!("Pages & Accounts:");
    info!("   Home:              GET  http://{host}:{port}/");
    info!("   Register:          GET|POST http://{host}:{port}/register");
    info!("   Login:             GET|POST http://{host}:{port}/login");
    info!("   Logout:            GET  http://{host}:{port}/logout");
    info!("   Programs:          GET|POST http://{host}:{port}/create");
    info!("   History:           GET|POST http://{host}:{port}/display");
    info!("   Design:            GET|POST http://{host}:{port}/design");
}

#[allow(clippy::cognitive_complexity)]
fn display_program_endpoints(host: &str, port: u16) {
    info!("Programs & Logging:");
    info!("   Create Program:    POST http://{host}:{port}/create_program");
    info!("   Log Form:          GET  http://{host}:{port}/log/{{program_id}}");
    info!("   Submit Log:        POST http://{host}:{port}/submit-log");
    info!("   Training Days:     GET  http://{host}:{port}/get_training_days/{{program_id}}");
    info!("   Training Weeks:    GET  http://{host}:{port}/get_training_weeks/{{program_id}}");
}

#[allow(clippy::cognitive_complexity)]
fn display_dashboard_endpoints(host: &str, port: u16) {
    info!("Dashboard & Monitoring:");
    info!("   Dashboard:         GET  http://{host}:{port}/dashboard/");
    info!("   Series API:        GET  http://{host}:{port}/dashboard/api/series");
    info!("   Health Check:      GET  http://{host}:{port}/health");
    info!("   Readiness:         GET  http://{host}:{port}/ready");
}
