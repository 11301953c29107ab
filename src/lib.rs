// ABOUTME: Main library entry point for the apelog training log
// ABOUTME: Wires persistence, services, routes, and the server runtime together
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Apelog
//!
//! A self-hosted strength training log. Users define programs (one mesocycle of
//! numbered training weeks, each with a weekday split), log exercises per
//! session, and review volume, load, and per-set reps on a dashboard.
//!
//! ## Architecture
//!
//! - **Models / Errors / Constants**: shared types from `apelog-core`
//! - **Database**: `SQLite` schema and data-access functions over explicit connections
//! - **Services**: provisioning, log ingestion, accounts, and reporting rules
//! - **Routes**: axum handlers for the server-rendered pages and JSON endpoints
//! - **Analytics**: series aggregation from `apelog-analytics`
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use apelog::config::ServerConfig;
//! use apelog::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("apelog configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Session tokens, cookies, and password hashing
pub mod auth;

/// Environment-driven configuration
pub mod config;

/// Application constants
pub mod constants;

/// `SQLite` persistence
pub mod database;

/// Error taxonomy and HTTP rendering
pub mod errors;

/// Server-rendered HTML pages
pub mod html;

/// Logging setup and domain event helpers
pub mod logging;

/// Request id and session extraction
pub mod middleware;

/// Domain models
pub mod models;

/// Shared server resources
pub mod resources;

/// HTTP routes
pub mod routes;

/// Server lifecycle
pub mod server;

/// Business rules behind the routes
pub mod services;
