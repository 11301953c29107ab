// ABOUTME: Read-side queries backing the dashboard filters and series
// ABOUTME: Joins logs across the program -> week -> session chain with optional equality filters

use crate::errors::AppResult;
use apelog_analytics::{LogRow, SessionFilter, WeekFilter};
use serde::Serialize;
use sqlx::{FromRow, SqliteConnection};

/// Dashboard filter selection
///
/// `None` / `All` disables the corresponding equality filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    /// Restrict to one program
    pub program_id: Option<i64>,
    /// Restrict to one week number
    pub week: WeekFilter,
    /// Restrict to sessions on one weekday
    pub session: SessionFilter,
    /// Restrict to one exercise name
    pub exercise: Option<String>,
}

// Shared by the series and exercise-list queries; binds $1..$4 in filter order.
const FILTERED_LOGS: &str = r"
    FROM logs l
    JOIN exercises e ON e.id = l.exercise_id
    JOIN training_weeks w ON w.id = l.training_week_id
    LEFT JOIN training_sessions s ON s.id = l.training_session_id
    WHERE ($1 IS NULL OR l.program_id = $1)
      AND ($2 IS NULL OR w.week_number = $2)
      AND ($3 IS NULL OR s.day_of_week = $3)
      AND ($4 IS NULL OR e.exercise_name = $4)
";

#[derive(FromRow)]
struct ReportRow {
    week_number: i64,
    exercise: String,
    load: f64,
    sets: i64,
    reps: String,
}

/// Logs matching the filter, joined with week number and exercise name
///
/// Logs without a resolved week cannot be placed on the week axis and are left out.
///
/// # Errors
///
/// Returns an error if the query fails or a stored rep scheme is malformed
pub async fn fetch_log_rows(conn: &mut SqliteConnection, filter: &ReportFilter) -> AppResult<Vec<LogRow>> {
    let sql = format!(
        "SELECT w.week_number, e.exercise_name AS exercise, l.load, l.sets, l.reps {FILTERED_LOGS} \
         ORDER BY w.week_number, e.exercise_name, l.id"
    );

    let rows = sqlx::query_as::<_, ReportRow>(&sql)
        .bind(filter.program_id)
        .bind(filter.week.number())
        .bind(filter.session.day())
        .bind(filter.exercise.as_deref())
        .fetch_all(&mut *conn)
        .await?;

    rows.into_iter()
        .map(|row| {
            Ok(LogRow {
                week_number: row.week_number,
                exercise: row.exercise,
                load: row.load,
                sets: row.sets,
                reps: row.reps.parse()?,
            })
        })
        .collect()
}

/// Exercise names that have logs under the filter (its exercise field is ignored)
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn logged_exercise_names(
    conn: &mut SqliteConnection,
    filter: &ReportFilter,
) -> AppResult<Vec<String>> {
    let sql = format!("SELECT DISTINCT e.exercise_name {FILTERED_LOGS} ORDER BY e.exercise_name");

    let names = sqlx::query_scalar::<_, String>(&sql)
        .bind(filter.program_id)
        .bind(filter.week.number())
        .bind(filter.session.day())
        .bind(None::<&str>)
        .fetch_all(&mut *conn)
        .await?;

    Ok(names)
}

/// A session option for the dashboard: one entry per weekday
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct SessionOption {
    /// Weekday index
    pub day_of_week: i64,
    /// Alphabetically first session name on that weekday
    pub name: String,
}

/// Weekdays with sessions in a program, optionally within one week
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn session_options(
    conn: &mut SqliteConnection,
    program_id: i64,
    week: WeekFilter,
) -> AppResult<Vec<SessionOption>> {
    let options = sqlx::query_as::<_, SessionOption>(
        r"
        SELECT s.day_of_week, MIN(s.name) AS name
        FROM training_sessions s
        JOIN training_weeks w ON w.id = s.training_week_id
        JOIN meso_cycles m ON m.id = w.meso_cycle_id
        WHERE m.program_id = $1
          AND ($2 IS NULL OR w.week_number = $2)
        GROUP BY s.day_of_week
        ORDER BY s.day_of_week
        ",
    )
    .bind(program_id)
    .bind(week.number())
    .fetch_all(&mut *conn)
    .await?;

    Ok(options)
}
