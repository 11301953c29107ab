// ABOUTME: Integration tests for log batch ingestion
// ABOUTME: Covers week/session reuse, exercise upsert, zero-as-absent skipping, and all-or-nothing commits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use apelog::database::{exercises, logs, programs};
use apelog::errors::ErrorCode;
use apelog::models::{LogEntry, RepScheme, Weekday};
use apelog::services::ingestion::submit_batch;

#[tokio::test]
async fn test_first_submission_creates_week_session_and_exercise() -> Result<()> {
    let resources = common::create_test_resources().await?;
    let database = &resources.database;
    let user = common::create_test_user(database, "ape").await?;
    let created = common::create_test_program(database, "PPL", 4, &[1, 3, 5]).await?;

    let receipt = submit_batch(
        database,
        common::batch(
            user.id,
            created.program.id,
            1,
            1,
            vec![common::entry("Bench", 80.0, 3, &[8, 8, 6], 2)],
        ),
    )
    .await?;

    assert_eq!(receipt.week.id, created.first_week.id);
    assert_eq!(receipt.session.name, "Week 1 - Monday");
    assert_eq!(receipt.written.len(), 1);
    assert_eq!(receipt.skipped, 0);

    let mut conn = database.acquire().await?;
    let stored = logs::list_program_logs(&mut conn, created.program.id).await?;
    assert_eq!(stored.len(), 1);
    let log = &stored[0];
    assert_eq!(log.user_id, user.id);
    assert_eq!(log.mesocycle_id, Some(created.meso_cycle.id));
    assert_eq!(log.training_week_id, Some(created.first_week.id));
    assert_eq!(log.training_session_id, Some(receipt.session.id));
    assert_eq!(log.load, 80.0);
    assert_eq!(log.sets, 3);
    assert_eq!(log.reps.to_string(), "8,8,6");
    assert_eq!(log.rir, 2);

    let bench = exercises::find_exercise(&mut conn, "Bench").await?.unwrap();
    assert_eq!(log.exercise_id, bench.id);

    Ok(())
}

#[tokio::test]
async fn test_repeat_submissions_reuse_rows() -> Result<()> {
    let resources = common::create_test_resources().await?;
    let database = &resources.database;
    let user = common::create_test_user(database, "ape").await?;
    let created = common::create_test_program(database, "PPL", 4, &[1, 3, 5]).await?;
    let program_id = created.program.id;

    let first = submit_batch(
        database,
        common::batch(user.id, program_id, 2, 3, vec![common::entry("Row", 60.0, 3, &[10, 10, 10], 2)]),
    )
    .await?;
    let second = submit_batch(
        database,
        common::batch(user.id, program_id, 2, 3, vec![common::entry("Row", 62.5, 3, &[10, 9, 8], 1)]),
    )
    .await?;

    assert_eq!(first.week.week_number, 2);
    assert_eq!(first.week.week_split.to_string(), "1,3,5");
    assert_eq!(second.week.id, first.week.id);
    assert_eq!(second.session.id, first.session.id);
    assert_eq!(
        second.written[0].exercise_id,
        first.written[0].exercise_id,
        "exercise names are upserted, not duplicated"
    );

    let mut conn = database.acquire().await?;
    assert_eq!(exercises::list_exercises(&mut conn).await?.len(), 1);
    assert_eq!(programs::list_weeks(&mut conn, created.meso_cycle.id).await?.len(), 2);
    assert_eq!(logs::list_program_logs(&mut conn, program_id).await?.len(), 2);

    Ok(())
}

#[tokio::test]
async fn test_incomplete_entries_are_skipped() -> Result<()> {
    let resources = common::create_test_resources().await?;
    let database = &resources.database;
    let user = common::create_test_user(database, "ape").await?;
    let created = common::create_test_program(database, "PPL", 4, &[1]).await?;

    let blank_load = LogEntry {
        load: None,
        ..common::entry("Curl", 0.0, 3, &[12], 2)
    };
    let entries = vec![
        common::entry("Squat", 100.0, 5, &[5, 5, 5, 5, 5], 2),
        common::entry("Deadlift", 140.0, 1, &[5], 0),
        common::entry("", 20.0, 3, &[10], 2),
        common::entry("Lunge", 0.0, 3, &[10], 2),
        blank_load,
    ];

    let receipt = submit_batch(
        database,
        common::batch(user.id, created.program.id, 1, 1, entries),
    )
    .await?;

    assert_eq!(receipt.written.len(), 1);
    assert_eq!(receipt.skipped, 4);

    let mut conn = database.acquire().await?;
    assert!(
        exercises::find_exercise(&mut conn, "Deadlift").await?.is_none(),
        "skipped entries do not create exercises"
    );

    Ok(())
}

#[tokio::test]
async fn test_failed_batch_writes_nothing() -> Result<()> {
    let resources = common::create_test_resources().await?;
    let database = &resources.database;
    let created = common::create_test_program(database, "PPL", 4, &[1]).await?;

    let error = submit_batch(
        database,
        common::batch(404, created.program.id, 3, 2, vec![common::entry("Bench", 80.0, 3, &[8], 2)]),
    )
    .await
    .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidReference);

    let mut conn = database.acquire().await?;
    assert_eq!(
        programs::list_weeks(&mut conn, created.meso_cycle.id).await?.len(),
        1,
        "week 3 was not created"
    );
    assert!(exercises::list_exercises(&mut conn).await?.is_empty());
    assert!(logs::list_program_logs(&mut conn, created.program.id).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_unknown_program_is_rejected() -> Result<()> {
    let resources = common::create_test_resources().await?;
    let database = &resources.database;
    let user = common::create_test_user(database, "ape").await?;

    let error = submit_batch(
        database,
        common::batch(user.id, 77, 1, 1, vec![common::entry("Bench", 80.0, 3, &[8], 2)]),
    )
    .await
    .unwrap_err();

    assert_eq!(error.code, ErrorCode::InvalidReference);
    assert_eq!(error.message, "MesoCycle not found for the given program");
    assert_eq!(error.http_status(), 400);

    Ok(())
}

#[tokio::test]
async fn test_session_name_and_reps_preserved_as_submitted() -> Result<()> {
    let resources = common::create_test_resources().await?;
    let database = &resources.database;
    let user = common::create_test_user(database, "ape").await?;
    let created = common::create_test_program(database, "PPL", 4, &[5]).await?;

    let mut batch = common::batch(
        user.id,
        created.program.id,
        1,
        5,
        vec![LogEntry {
            reps: RepScheme::new(vec![12, 10]),
            ..common::entry("Press", 40.0, 4, &[], 3)
        }],
    );
    batch.session_name = Some("Shoulders".to_owned());

    let receipt = submit_batch(database, batch).await?;
    assert_eq!(receipt.session.name, "Shoulders");
    assert_eq!(receipt.session.day_of_week, Weekday::new(5)?);

    let log = &receipt.written[0];
    assert_eq!(log.sets, 4, "set count is not reconciled with the rep list");
    assert_eq!(log.reps.per_set(), &[12, 10]);

    Ok(())
}
