// ABOUTME: SQLite storage for users, training structure, and exercise logs
// ABOUTME: Owns the connection pool and creates the schema on startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! [`Database`] owns the `SQLite` pool and the schema. Data access lives in the
//! submodules as free functions over an explicit `&mut SqliteConnection`, so the
//! same call works on a pooled connection or inside an open transaction:
//!
//! ```text
//! let mut tx = database.begin().await?;
//! let exercise = exercises::upsert_exercise(&mut tx, "Bench").await?;
//! tx.commit().await?;
//! ```
//!
//! Tables are created with `CREATE TABLE IF NOT EXISTS`; there is no migration
//! history.

pub mod exercises;
pub mod logs;
pub mod programs;
pub mod reports;
pub mod users;

use crate::config::DatabaseUrl;
use crate::errors::{is_unique_violation, AppError, AppResult};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteQueryResult};
use sqlx::{Pool, Sqlite, Transaction};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

/// Connections kept for a file database
const FILE_POOL_CONNECTIONS: u32 = 8;

/// Opening statement for write transactions
const BEGIN_WRITE: &str = "BEGIN IMMEDIATE";

/// How long a writer waits for the `SQLite` lock before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database manager for the training log
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Open (creating if needed) the database and run schema setup
    ///
    /// An in-memory database lives inside a single connection, so the pool is
    /// pinned to one connection that is never recycled.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created, the
    /// connection fails, or schema setup fails
    pub async fn new(url: &DatabaseUrl) -> AppResult<Self> {
        if let DatabaseUrl::SQLite { path } = url {
            ensure_parent_dir(path).await?;
        }

        let options = SqliteConnectOptions::from_str(&url.to_connection_string())?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(BUSY_TIMEOUT);

        let pool_options = if url.is_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(FILE_POOL_CONNECTIONS)
        };

        let pool = pool_options.connect_with(options).await?;
        let db = Self { pool };
        db.migrate().await?;

        info!(database = %url, "Database ready");
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Check out a pooled connection for read-only work
    ///
    /// # Errors
    ///
    /// Returns an error if the pool is closed or exhausted
    pub async fn acquire(&self) -> AppResult<PoolConnection<Sqlite>> {
        Ok(self.pool.acquire().await?)
    }

    /// Start a write transaction; dropping it without `commit` rolls back
    ///
    /// The write lock is taken up front with `BEGIN IMMEDIATE`, so concurrent
    /// writers queue on the busy timeout. A deferred transaction that reads
    /// before writing gets `SQLITE_BUSY` without waiting when another writer
    /// wins the upgrade.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be started
    pub async fn begin(&self) -> AppResult<Transaction<'static, Sqlite>> {
        Ok(self.pool.begin_with(BEGIN_WRITE).await?)
    }

    /// Round-trip a trivial query; used by the readiness probe
    ///
    /// # Errors
    ///
    /// Returns an error if the database does not answer
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any table or index cannot be created
    pub async fn migrate(&self) -> AppResult<()> {
        // Order matters: later tables reference earlier ones
        self.migrate_users().await?;
        self.migrate_exercises().await?;
        self.migrate_programs().await?;
        self.migrate_logs().await?;

        debug!("Schema is up to date");
        Ok(())
    }
}

/// Interpret an `INSERT ... ON CONFLICT DO NOTHING`
///
/// Returns the new row id when this statement created the row, `None` when the
/// key already existed. A unique violation raised by a racing writer also maps
/// to `None`, so the caller re-fetches instead of failing.
pub(crate) fn inserted_row_id(
    outcome: Result<SqliteQueryResult, sqlx::Error>,
) -> AppResult<Option<i64>> {
    match outcome {
        Ok(done) if done.rows_affected() == 1 => Ok(Some(done.last_insert_rowid())),
        Ok(_) => Ok(None),
        Err(e) if is_unique_violation(&e) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn ensure_parent_dir(path: &Path) -> AppResult<()> {
    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    tokio::fs::create_dir_all(parent).await.map_err(|e| {
        AppError::config(format!(
            "Cannot create database directory {}: {e}",
            parent.display()
        ))
        .with_source(e)
    })
}
