// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory resources, user and program fixtures, and HTTP request helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `apelog`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use anyhow::{Context, Result};
use apelog::{
    config::ServerConfig,
    database::{users, Database},
    models::{LogBatch, LogEntry, NewProgram, RepScheme, User, WeekSplit, Weekday},
    resources::ServerResources,
    services::provisioning::{self, ProvisionedProgram},
};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request},
    response::Response,
};
use chrono::NaiveDate;
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Resources over a fresh in-memory database
pub async fn create_test_resources() -> Result<Arc<ServerResources>> {
    init_test_logging();
    let resources = ServerResources::connect(ServerConfig::for_testing()).await?;
    Ok(Arc::new(resources))
}

/// Insert a user directly; the hash is not a valid bcrypt hash, so this user cannot log in
pub async fn create_test_user(database: &Database, user_name: &str) -> Result<User> {
    let mut conn = database.acquire().await?;
    Ok(users::create_user(&mut conn, user_name, "not-a-bcrypt-hash").await?)
}

/// Weekdays from 1-based indices
pub fn split(days: &[i64]) -> WeekSplit {
    WeekSplit::new(days.iter().map(|&day| Weekday::new(day).unwrap()))
}

/// Create a program starting 2024-01-01
pub async fn create_test_program(
    database: &Database,
    name: &str,
    total_weeks: i64,
    days: &[i64],
) -> Result<ProvisionedProgram> {
    let new_program = NewProgram {
        name: name.to_owned(),
        start_date: NaiveDate::from_ymd_opt(2024, 1, 1).context("valid date")?,
        total_weeks,
        training_days: split(days),
    };
    Ok(provisioning::create_program(database, &new_program).await?)
}

/// A complete entry
pub fn entry(name: &str, load: f64, sets: i64, reps: &[u32], rir: i64) -> LogEntry {
    LogEntry {
        exercise_name: name.to_owned(),
        load: Some(load),
        sets: Some(sets),
        rir: Some(rir),
        reps: RepScheme::new(reps.to_vec()),
    }
}

/// A batch for `week_number` on weekday `day`
pub fn batch(
    user_id: i64,
    program_id: i64,
    week_number: i64,
    day: i64,
    entries: Vec<LogEntry>,
) -> LogBatch {
    LogBatch {
        user_id,
        program_id,
        week_number,
        session_day: Weekday::new(day).unwrap(),
        session_name: None,
        entries,
    }
}

/// `session=<token>` for a user, ready for a `Cookie` header
pub fn session_cookie(resources: &ServerResources, user: &User) -> Result<String> {
    let token = resources.sessions.issue(user)?;
    Ok(format!("session={token}"))
}

/// Build a request, optionally url-encoded and with a cookie
pub fn request(method: Method, uri: &str, form: Option<&str>, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if form.is_some() {
        builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    }
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder
        .body(form.map_or_else(Body::empty, |body| Body::from(body.to_owned())))
        .unwrap()
}

/// Collect a response body as text
pub async fn body_string(response: Response) -> Result<String> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(String::from_utf8(bytes.to_vec())?)
}

/// Collect a response body as JSON
pub async fn body_json(response: Response) -> Result<serde_json::Value> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// The `name=value` part of a response's `Set-Cookie` header
pub fn cookie_pair(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .next()
        .map(str::to_owned)
}
