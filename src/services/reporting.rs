// ABOUTME: Dashboard data: cascading filter options and metric series
// ABOUTME: Fetches filtered log rows and hands them to the aggregation engine

use crate::constants::error_messages::NO_DATA;
use crate::database::logs::{self, LogHistoryRow};
use crate::database::reports::{self, ReportFilter, SessionOption};
use crate::database::{programs, Database};
use crate::errors::AppResult;
use apelog_analytics::{aggregate, Metric, SeriesPoint, WeekFilter};
use serde::Serialize;

/// Most recent logs shown on the history page
pub const HISTORY_LIMIT: i64 = 200;

/// Series payload for the dashboard chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesReport {
    /// Metric the points measure
    pub metric: Metric,
    /// Points ordered by week, exercise, then set position
    pub points: Vec<SeriesPoint>,
    /// True when no log matched the filters
    pub empty: bool,
    /// Explanation shown instead of a chart
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

/// Build one metric's series for a filter selection
///
/// No matching logs is a normal, empty report.
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn series(database: &Database, filter: &ReportFilter, metric: Metric) -> AppResult<SeriesReport> {
    let rows = {
        let mut conn = database.acquire().await?;
        reports::fetch_log_rows(&mut conn, filter).await?
    };

    let series = aggregate(metric, &rows);
    let empty = series.is_empty();
    Ok(SeriesReport {
        metric: series.metric,
        points: series.points,
        empty,
        message: empty.then_some(NO_DATA),
    })
}

/// Week numbers of a program; empty for an unknown program
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn week_options(database: &Database, program_id: i64) -> AppResult<Vec<i64>> {
    let mut conn = database.acquire().await?;
    let Some(meso) = programs::find_mesocycle(&mut conn, program_id).await? else {
        return Ok(Vec::new());
    };

    let weeks = programs::list_weeks(&mut conn, meso.id).await?;
    Ok(weeks.into_iter().map(|week| week.week_number).collect())
}

/// Weekdays with sessions in a program, optionally within one week
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn session_options(
    database: &Database,
    program_id: i64,
    week: WeekFilter,
) -> AppResult<Vec<SessionOption>> {
    let mut conn = database.acquire().await?;
    reports::session_options(&mut conn, program_id, week).await
}

/// Exercises with logs under the filter
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn exercise_options(database: &Database, filter: &ReportFilter) -> AppResult<Vec<String>> {
    let mut conn = database.acquire().await?;
    reports::logged_exercise_names(&mut conn, filter).await
}

/// A user's most recent logs, newest first
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn history(database: &Database, user_id: i64) -> AppResult<Vec<LogHistoryRow>> {
    let mut conn = database.acquire().await?;
    logs::list_user_history(&mut conn, user_id, HISTORY_LIMIT).await
}
