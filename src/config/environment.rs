// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, deployment modes, and runtime configuration parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management
//!
//! All settings come from environment variables; there is no configuration file.

use crate::auth::generate_session_secret;
use crate::constants::{defaults, session};
use crate::errors::{AppError, AppResult, ErrorCode};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{info, warn};

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Normal operation
    #[default]
    Info,
    /// Verbose
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }

    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Environment type for cookie security and logging defaults
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Deployed instance
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database file
    SQLite {
        /// File path
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string; bare paths are treated as `SQLite` files
    #[must_use]
    pub fn parse_url(s: &str) -> Self {
        let path_str = s.strip_prefix("sqlite:").unwrap_or(s);
        if path_str == ":memory:" {
            Self::Memory
        } else {
            Self::SQLite {
                path: PathBuf::from(path_str.trim_start_matches("//")),
            }
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::parse_url(defaults::DATABASE_URL)
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// HMAC key for session tokens; never printed
#[derive(Clone)]
pub struct SessionSecret(Vec<u8>);

impl SessionSecret {
    /// Wrap raw key bytes
    #[must_use]
    pub const fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Key bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SessionSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionSecret([redacted])")
    }
}

/// Session cookie settings
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Key signing session tokens
    pub session_secret: SessionSecret,
    /// Session lifetime in hours
    pub session_expiry_hours: i64,
    /// Emit the `Secure` cookie attribute
    pub secure_cookies: bool,
}

/// Database settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Where the `SQLite` database lives
    pub url: DatabaseUrl,
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// HTTP port
    pub http_port: u16,
    /// Log level
    pub log_level: LogLevel,
    /// Deployment environment
    pub environment: Environment,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Session configuration
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` when a numeric or boolean variable does not parse
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let environment =
            Environment::from_str_or_default(&env_var_or("ENVIRONMENT", "development"));

        let session_secret = if let Ok(secret) = env::var("SESSION_SECRET") {
            SessionSecret::new(secret.into_bytes())
        } else {
            warn!("SESSION_SECRET not set; sessions will not survive a restart");
            SessionSecret::new(generate_session_secret()?.to_vec())
        };

        let config = Self {
            host: env_var_or("HOST", defaults::HOST),
            http_port: parse_env("HTTP_PORT", defaults::HTTP_PORT)?,
            log_level: LogLevel::from_str_or_default(&env_var_or("LOG_LEVEL", "info")),
            environment,
            database: DatabaseConfig {
                url: DatabaseUrl::parse_url(&env_var_or("DATABASE_URL", defaults::DATABASE_URL)),
            },
            auth: AuthConfig {
                session_secret,
                session_expiry_hours: parse_env(
                    "SESSION_EXPIRY_HOURS",
                    session::DEFAULT_EXPIRY_HOURS,
                )?,
                secure_cookies: parse_env("SECURE_COOKIES", environment.is_production())?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Configuration for tests: in-memory database and a fixed session key
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            host: defaults::HOST.to_owned(),
            http_port: 0,
            log_level: LogLevel::Warn,
            environment: Environment::Testing,
            database: DatabaseConfig {
                url: DatabaseUrl::Memory,
            },
            auth: AuthConfig {
                session_secret: SessionSecret::new(b"apelog-test-session-secret".to_vec()),
                session_expiry_hours: session::DEFAULT_EXPIRY_HOURS,
                secure_cookies: false,
            },
        }
    }

    /// Reject values that parse but cannot work
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` for a non-positive session lifetime or empty secret
    pub fn validate(&self) -> AppResult<()> {
        if self.auth.session_expiry_hours <= 0 {
            return Err(AppError::new(
                ErrorCode::ConfigInvalid,
                "SESSION_EXPIRY_HOURS must be positive",
            ));
        }
        if self.auth.session_secret.as_bytes().is_empty() {
            return Err(AppError::new(
                ErrorCode::ConfigInvalid,
                "SESSION_SECRET must not be empty",
            ));
        }
        Ok(())
    }

    /// One-line summary for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "apelog configuration: environment={}, bind={}:{}, database={}, log_level={}, session_expiry_hours={}, secure_cookies={}",
            self.environment,
            self.host,
            self.http_port,
            self.database.url,
            self.log_level,
            self.auth.session_expiry_hours,
            self.auth.secure_cookies,
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, falling back to `default` when unset
fn parse_env<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| {
            AppError::new(
                ErrorCode::ConfigInvalid,
                format!("Invalid value for {key}: '{raw}'"),
            )
        }),
        Err(_) => Ok(default),
    }
}
