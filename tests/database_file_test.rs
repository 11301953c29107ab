// ABOUTME: Tests for file-backed SQLite databases
// ABOUTME: Covers directory creation, idempotent schema setup, reopen, and concurrent writers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use apelog::config::DatabaseUrl;
use apelog::database::{exercises, logs, programs, Database};
use apelog::services::ingestion;
use std::collections::HashSet;
use tempfile::TempDir;
use tokio::task::JoinSet;

const CONCURRENT_WRITERS: usize = 8;
const WRITER_ROUNDS: i64 = 5;

async fn open_file_database(dir: &TempDir) -> Result<Database> {
    let path = dir.path().join("apelog.db");
    let url = DatabaseUrl::parse_url(&format!("sqlite:{}", path.display()));
    Ok(Database::new(&url).await?)
}

#[tokio::test]
async fn test_file_database_survives_reopen() -> Result<()> {
    common::init_test_logging();
    let dir = TempDir::new()?;
    let path = dir.path().join("nested").join("apelog.db");
    let url = DatabaseUrl::parse_url(&format!("sqlite:{}", path.display()));

    let database = Database::new(&url).await?;
    assert!(path.exists(), "missing parent directories are created");
    let created = common::create_test_program(&database, "PPL", 4, &[1, 3, 5]).await?;
    {
        let mut conn = database.acquire().await?;
        exercises::upsert_exercise(&mut conn, "Bench").await?;
    }
    database.pool().close().await;

    let reopened = Database::new(&url).await?;
    let mut conn = reopened.acquire().await?;
    let program = programs::find_program(&mut conn, created.program.id).await?.unwrap();
    assert_eq!(program.name, "PPL");
    assert!(exercises::find_exercise(&mut conn, "Bench").await?.is_some());

    Ok(())
}

#[tokio::test]
async fn test_schema_setup_is_idempotent() -> Result<()> {
    let resources = common::create_test_resources().await?;

    resources.database.migrate().await?;
    resources.database.migrate().await?;
    resources.database.ping().await?;

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_batches_share_new_week_and_exercise() -> Result<()> {
    common::init_test_logging();
    let dir = TempDir::new()?;
    let database = open_file_database(&dir).await?;
    let user = common::create_test_user(&database, "ape").await?;
    let created = common::create_test_program(&database, "PPL", 12, &[1, 3, 5]).await?;
    let program_id = created.program.id;

    for round in 0..WRITER_ROUNDS {
        let week_number = round + 2;
        let exercise_name = format!("Bench {week_number}");

        let mut writers = JoinSet::new();
        for _ in 0..CONCURRENT_WRITERS {
            let database = database.clone();
            let entries = vec![common::entry(&exercise_name, 80.0, 3, &[8, 8, 6], 2)];
            let batch = common::batch(user.id, program_id, week_number, 1, entries);
            writers.spawn(async move { ingestion::submit_batch(&database, batch).await });
        }

        let mut weeks = HashSet::new();
        let mut sessions = HashSet::new();
        while let Some(joined) = writers.join_next().await {
            let receipt = joined??;
            weeks.insert(receipt.week.id);
            sessions.insert(receipt.session.id);
        }
        assert_eq!(weeks.len(), 1, "week {week_number} created once");
        assert_eq!(sessions.len(), 1, "session in week {week_number} created once");
    }

    let mut conn = database.acquire().await?;
    let all_exercises = exercises::list_exercises(&mut conn).await?;
    assert_eq!(all_exercises.len(), usize::try_from(WRITER_ROUNDS)?);

    let program_logs = logs::list_program_logs(&mut conn, program_id).await?;
    assert_eq!(
        program_logs.len(),
        CONCURRENT_WRITERS * usize::try_from(WRITER_ROUNDS)?
    );

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_program_creation() -> Result<()> {
    common::init_test_logging();
    let dir = TempDir::new()?;
    let database = open_file_database(&dir).await?;

    let mut writers = JoinSet::new();
    for index in 0..CONCURRENT_WRITERS {
        let database = database.clone();
        writers.spawn(async move {
            common::create_test_program(&database, &format!("Block {index}"), 4, &[2, 4]).await
        });
    }
    while let Some(joined) = writers.join_next().await {
        joined??;
    }

    let mut conn = database.acquire().await?;
    assert_eq!(programs::list_programs(&mut conn).await?.len(), CONCURRENT_WRITERS);

    Ok(())
}
