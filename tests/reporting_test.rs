// ABOUTME: Integration tests for dashboard reporting over stored logs
// ABOUTME: Exercises filter combinations, cascading options, series metrics, and history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use apelog::database::reports::ReportFilter;
use apelog::models::Weekday;
use apelog::resources::ServerResources;
use apelog::services::ingestion::submit_batch;
use apelog::services::provisioning::ProvisionedProgram;
use apelog::services::reporting;
use apelog_analytics::{Metric, SessionFilter, WeekFilter};

struct Fixture {
    resources: std::sync::Arc<ServerResources>,
    ppl: ProvisionedProgram,
    other: ProvisionedProgram,
    user_id: i64,
}

/// PPL: week 1 Mon Bench + Squat, week 1 Wed Bench, week 2 Mon Bench; another program with one Curl
async fn fixture() -> Result<Fixture> {
    let resources = common::create_test_resources().await?;
    let database = &resources.database;
    let user = common::create_test_user(database, "ape").await?;
    let ppl = common::create_test_program(database, "PPL", 4, &[1, 3, 5]).await?;
    let other = common::create_test_program(database, "Arms", 2, &[2]).await?;

    let id = ppl.program.id;
    submit_batch(
        database,
        common::batch(
            user.id,
            id,
            1,
            1,
            vec![
                common::entry("Bench", 80.0, 3, &[8, 8, 6], 2),
                common::entry("Squat", 100.0, 3, &[10, 10, 8], 2),
            ],
        ),
    )
    .await?;
    submit_batch(
        database,
        common::batch(user.id, id, 1, 3, vec![common::entry("Bench", 70.0, 2, &[10, 10], 1)]),
    )
    .await?;
    submit_batch(
        database,
        common::batch(user.id, id, 2, 1, vec![common::entry("Bench", 82.5, 3, &[8, 7, 6], 1)]),
    )
    .await?;
    submit_batch(
        database,
        common::batch(user.id, other.program.id, 1, 2, vec![common::entry("Curl", 15.0, 3, &[12], 1)]),
    )
    .await?;

    Ok(Fixture {
        resources,
        ppl,
        other,
        user_id: user.id,
    })
}

fn ppl_filter(fixture: &Fixture) -> ReportFilter {
    ReportFilter {
        program_id: Some(fixture.ppl.program.id),
        ..ReportFilter::default()
    }
}

#[tokio::test]
async fn test_load_sums_sessions_within_each_week() -> Result<()> {
    let fixture = fixture().await?;
    let filter = ReportFilter {
        exercise: Some("Bench".to_owned()),
        ..ppl_filter(&fixture)
    };

    let report = reporting::series(&fixture.resources.database, &filter, Metric::Load).await?;

    assert!(!report.empty);
    assert_eq!(report.message, None);
    let points: Vec<_> = report
        .points
        .iter()
        .map(|p| (p.week_number, p.exercise.as_str(), p.value))
        .collect();
    assert_eq!(points, vec![(1, "Bench", 150.0), (2, "Bench", 82.5)]);

    Ok(())
}

#[tokio::test]
async fn test_volume_for_one_week() -> Result<()> {
    let fixture = fixture().await?;
    let filter = ReportFilter {
        week: WeekFilter::Number(1),
        exercise: Some("Squat".to_owned()),
        ..ppl_filter(&fixture)
    };

    let report = reporting::series(&fixture.resources.database, &filter, Metric::Volume).await?;

    assert_eq!(report.points.len(), 1);
    assert_eq!(report.points[0].value, 8400.0);

    Ok(())
}

#[tokio::test]
async fn test_session_filter_matches_weekday_across_weeks() -> Result<()> {
    let fixture = fixture().await?;
    let filter = ReportFilter {
        session: SessionFilter::Day(Weekday::new(1)?),
        exercise: Some("Bench".to_owned()),
        ..ppl_filter(&fixture)
    };

    let report = reporting::series(&fixture.resources.database, &filter, Metric::Load).await?;

    let points: Vec<_> = report.points.iter().map(|p| (p.week_number, p.value)).collect();
    assert_eq!(points, vec![(1, 80.0), (2, 82.5)]);

    Ok(())
}

#[tokio::test]
async fn test_reps_metric_has_a_point_per_set() -> Result<()> {
    let fixture = fixture().await?;
    let filter = ReportFilter {
        week: WeekFilter::Number(2),
        ..ppl_filter(&fixture)
    };

    let report = reporting::series(&fixture.resources.database, &filter, Metric::Reps).await?;

    let points: Vec<_> = report
        .points
        .iter()
        .map(|p| (p.set_position, p.value))
        .collect();
    assert_eq!(points, vec![(Some(1), 8.0), (Some(2), 7.0), (Some(3), 6.0)]);

    Ok(())
}

#[tokio::test]
async fn test_no_match_is_an_empty_report() -> Result<()> {
    let fixture = fixture().await?;
    let filter = ReportFilter {
        week: WeekFilter::Number(4),
        ..ppl_filter(&fixture)
    };

    let report = reporting::series(&fixture.resources.database, &filter, Metric::Volume).await?;

    assert!(report.empty);
    assert!(report.points.is_empty());
    assert_eq!(report.message, Some("No data for the selected filters"));

    Ok(())
}

#[tokio::test]
async fn test_unfiltered_series_spans_programs() -> Result<()> {
    let fixture = fixture().await?;

    let report =
        reporting::series(&fixture.resources.database, &ReportFilter::default(), Metric::Load).await?;

    assert!(report.points.iter().any(|p| p.exercise == "Curl"));
    assert!(report.points.iter().any(|p| p.exercise == "Squat"));

    Ok(())
}

#[tokio::test]
async fn test_cascading_options() -> Result<()> {
    let fixture = fixture().await?;
    let database = &fixture.resources.database;
    let id = fixture.ppl.program.id;

    assert_eq!(reporting::week_options(database, id).await?, vec![1, 2]);
    assert!(reporting::week_options(database, 999).await?.is_empty());

    let sessions = reporting::session_options(database, id, WeekFilter::All).await?;
    let days: Vec<_> = sessions.iter().map(|s| s.day_of_week).collect();
    assert_eq!(days, vec![1, 3]);
    assert_eq!(sessions[0].name, "Week 1 - Monday");

    let week_two = reporting::session_options(database, id, WeekFilter::Number(2)).await?;
    assert_eq!(week_two.len(), 1);
    assert_eq!(week_two[0].name, "Week 2 - Monday");

    let names = reporting::exercise_options(database, &ppl_filter(&fixture)).await?;
    assert_eq!(names, vec!["Bench".to_owned(), "Squat".to_owned()]);

    let wednesday = ReportFilter {
        session: SessionFilter::Day(Weekday::new(3)?),
        exercise: Some("Squat".to_owned()),
        ..ppl_filter(&fixture)
    };
    assert_eq!(
        reporting::exercise_options(database, &wednesday).await?,
        vec!["Bench".to_owned()],
        "the exercise selector does not narrow its own options"
    );

    let arms = ReportFilter {
        program_id: Some(fixture.other.program.id),
        ..ReportFilter::default()
    };
    assert_eq!(reporting::exercise_options(database, &arms).await?, vec!["Curl".to_owned()]);

    Ok(())
}

#[tokio::test]
async fn test_history_is_newest_first() -> Result<()> {
    let fixture = fixture().await?;

    let rows = reporting::history(&fixture.resources.database, fixture.user_id).await?;

    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0].exercise_name, "Curl");
    assert_eq!(rows[0].program_name.as_deref(), Some("Arms"));
    assert_eq!(rows[1].week_number, Some(2));
    assert_eq!(rows[1].reps, "8,7,6");
    assert!(reporting::history(&fixture.resources.database, 999).await?.is_empty());

    Ok(())
}
