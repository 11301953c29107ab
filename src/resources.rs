// ABOUTME: Shared resource container handed to every route as axum state
// ABOUTME: Holds the database, the session manager, and the loaded configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server Resources
//!
//! Built once at startup and shared as `Arc<ServerResources>`. Nothing in here
//! holds per-request state; everything mutable lives in the database.

use crate::auth::SessionManager;
use crate::config::ServerConfig;
use crate::database::Database;
use crate::errors::AppResult;
use std::sync::Arc;

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    /// Connection pool and schema owner
    pub database: Arc<Database>,
    /// Session token signing and validation
    pub sessions: Arc<SessionManager>,
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Wire resources together from an open database and the configuration
    #[must_use]
    pub fn new(database: Database, config: Arc<ServerConfig>) -> Self {
        let sessions = SessionManager::new(&config.auth);
        Self {
            database: Arc::new(database),
            sessions: Arc::new(sessions),
            config,
        }
    }

    /// Open the configured database and wire resources around it
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated
    pub async fn connect(config: ServerConfig) -> AppResult<Self> {
        let database = Database::new(&config.database.url).await?;
        Ok(Self::new(database, Arc::new(config)))
    }
}
