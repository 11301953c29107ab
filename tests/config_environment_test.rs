// ABOUTME: Tests for environment-driven server configuration
// ABOUTME: Validates defaults, overrides, and rejection of malformed values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use apelog::config::{DatabaseUrl, Environment, LogLevel, ServerConfig};
use apelog::errors::ErrorCode;
use apelog::logging::LoggingConfig;
use serial_test::serial;
use std::env;
use std::path::PathBuf;

const VARS: [&str; 8] = [
    "HOST",
    "HTTP_PORT",
    "DATABASE_URL",
    "SESSION_SECRET",
    "SESSION_EXPIRY_HOURS",
    "SECURE_COOKIES",
    "ENVIRONMENT",
    "LOG_LEVEL",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_when_unset() {
    clear_env();

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.http_port, 8081);
    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(
        config.database.url,
        DatabaseUrl::SQLite {
            path: PathBuf::from("./data/apelog.db")
        }
    );
    assert_eq!(config.auth.session_expiry_hours, 24);
    assert!(!config.auth.secure_cookies);
    assert_eq!(config.auth.session_secret.as_bytes().len(), 64);
}

#[test]
#[serial]
fn test_overrides_from_environment() {
    clear_env();
    env::set_var("HTTP_PORT", "9000");
    env::set_var("DATABASE_URL", "sqlite::memory:");
    env::set_var("SESSION_SECRET", "correct horse battery staple");
    env::set_var("SESSION_EXPIRY_HOURS", "12");
    env::set_var("ENVIRONMENT", "production");
    env::set_var("LOG_LEVEL", "debug");

    let config = ServerConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.http_port, 9000);
    assert!(config.database.url.is_memory());
    assert_eq!(
        config.auth.session_secret.as_bytes(),
        b"correct horse battery staple"
    );
    assert_eq!(config.auth.session_expiry_hours, 12);
    assert_eq!(config.environment, Environment::Production);
    assert!(config.auth.secure_cookies, "production defaults to secure cookies");
    assert_eq!(config.log_level, LogLevel::Debug);

    let summary = config.summary();
    assert!(summary.contains("bind=127.0.0.1:9000"));
    assert!(!summary.contains("correct horse"));
}

#[test]
#[serial]
fn test_malformed_values_are_rejected() {
    clear_env();
    env::set_var("HTTP_PORT", "eighty");
    let error = ServerConfig::from_env().unwrap_err();
    clear_env();
    assert_eq!(error.code, ErrorCode::ConfigInvalid);
    assert!(error.message.contains("HTTP_PORT"));

    env::set_var("SESSION_EXPIRY_HOURS", "0");
    let error = ServerConfig::from_env().unwrap_err();
    clear_env();
    assert_eq!(error.code, ErrorCode::ConfigInvalid);
}

#[test]
#[serial]
fn test_secure_cookie_override() {
    clear_env();
    env::set_var("ENVIRONMENT", "production");
    env::set_var("SECURE_COOKIES", "false");

    let config = ServerConfig::from_env().unwrap();
    clear_env();

    assert!(!config.auth.secure_cookies);
}

#[test]
#[serial]
fn test_log_level_drives_logging_config() {
    clear_env();
    env::set_var("LOG_LEVEL", "warn");

    let server = ServerConfig::from_env().unwrap();
    let logging = LoggingConfig::from_env();
    clear_env();

    assert_eq!(server.log_level, LogLevel::Warn);
    assert_eq!(logging.level, server.log_level);
    assert_eq!(logging.level_filter(), tracing::level_filters::LevelFilter::WARN);
}
