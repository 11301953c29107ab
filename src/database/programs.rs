// ABOUTME: Storage for the program -> mesocycle -> week -> session chain
// ABOUTME: Plain inserts for provisioning plus insert-or-fetch for lazily created weeks and sessions

use super::{inserted_row_id, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{MesoCycle, Program, TrainingSession, TrainingWeek, WeekSplit, Weekday};
use chrono::NaiveDate;
use sqlx::SqliteConnection;

impl Database {
    /// Create the program structure tables
    ///
    /// `meso_cycles.program_id` is unique: every program owns exactly one
    /// mesocycle. Weeks are unique per (mesocycle, number) and sessions per
    /// (week, weekday); the lazy creation paths depend on both constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if a table cannot be created
    pub(super) async fn migrate_programs(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS programs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS meso_cycles (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                program_id INTEGER NOT NULL UNIQUE REFERENCES programs(id),
                start_date TEXT NOT NULL,
                total_weeks INTEGER NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS training_weeks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                meso_cycle_id INTEGER NOT NULL REFERENCES meso_cycles(id),
                week_number INTEGER NOT NULL,
                week_split TEXT NOT NULL,
                UNIQUE (meso_cycle_id, week_number)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS training_sessions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                training_week_id INTEGER NOT NULL REFERENCES training_weeks(id),
                name TEXT NOT NULL,
                day_of_week INTEGER NOT NULL,
                UNIQUE (training_week_id, day_of_week)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Insert a program row
///
/// # Errors
///
/// Returns an error if the insert fails
pub async fn insert_program(conn: &mut SqliteConnection, name: &str) -> AppResult<Program> {
    let done = sqlx::query("INSERT INTO programs (name) VALUES ($1)")
        .bind(name)
        .execute(&mut *conn)
        .await?;

    Ok(Program {
        id: done.last_insert_rowid(),
        name: name.to_owned(),
    })
}

/// Insert the mesocycle of a program
///
/// # Errors
///
/// Returns `ResourceAlreadyExists` if the program already has one
pub async fn insert_mesocycle(
    conn: &mut SqliteConnection,
    program_id: i64,
    start_date: NaiveDate,
    total_weeks: i64,
) -> AppResult<MesoCycle> {
    let done = sqlx::query(
        "INSERT INTO meso_cycles (program_id, start_date, total_weeks) VALUES ($1, $2, $3)",
    )
    .bind(program_id)
    .bind(start_date)
    .bind(total_weeks)
    .execute(&mut *conn)
    .await?;

    Ok(MesoCycle {
        id: done.last_insert_rowid(),
        program_id,
        start_date,
        total_weeks,
    })
}

/// Insert a training week
///
/// # Errors
///
/// Returns `ResourceAlreadyExists` if the week number is taken in this mesocycle
pub async fn insert_week(
    conn: &mut SqliteConnection,
    meso_cycle_id: i64,
    week_number: i64,
    week_split: &WeekSplit,
) -> AppResult<TrainingWeek> {
    let done = sqlx::query(
        "INSERT INTO training_weeks (meso_cycle_id, week_number, week_split) VALUES ($1, $2, $3)",
    )
    .bind(meso_cycle_id)
    .bind(week_number)
    .bind(week_split.to_string())
    .execute(&mut *conn)
    .await?;

    Ok(TrainingWeek {
        id: done.last_insert_rowid(),
        meso_cycle_id,
        week_number,
        week_split: week_split.clone(),
    })
}

/// Find a program by id
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn find_program(conn: &mut SqliteConnection, program_id: i64) -> AppResult<Option<Program>> {
    let program = sqlx::query_as::<_, Program>("SELECT id, name FROM programs WHERE id = $1")
        .bind(program_id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(program)
}

/// All programs, oldest first
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn list_programs(conn: &mut SqliteConnection) -> AppResult<Vec<Program>> {
    let programs = sqlx::query_as::<_, Program>("SELECT id, name FROM programs ORDER BY id")
        .fetch_all(&mut *conn)
        .await?;

    Ok(programs)
}

/// The mesocycle of a program
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn find_mesocycle(
    conn: &mut SqliteConnection,
    program_id: i64,
) -> AppResult<Option<MesoCycle>> {
    let meso = sqlx::query_as::<_, MesoCycle>(
        "SELECT id, program_id, start_date, total_weeks FROM meso_cycles WHERE program_id = $1",
    )
    .bind(program_id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(meso)
}

/// Find a week of a mesocycle by number
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn find_week(
    conn: &mut SqliteConnection,
    meso_cycle_id: i64,
    week_number: i64,
) -> AppResult<Option<TrainingWeek>> {
    let week = sqlx::query_as::<_, TrainingWeek>(
        r"
        SELECT id, meso_cycle_id, week_number, week_split
        FROM training_weeks
        WHERE meso_cycle_id = $1 AND week_number = $2
        ",
    )
    .bind(meso_cycle_id)
    .bind(week_number)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(week)
}

/// Weeks of a mesocycle ordered by number
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn list_weeks(conn: &mut SqliteConnection, meso_cycle_id: i64) -> AppResult<Vec<TrainingWeek>> {
    let weeks = sqlx::query_as::<_, TrainingWeek>(
        r"
        SELECT id, meso_cycle_id, week_number, week_split
        FROM training_weeks
        WHERE meso_cycle_id = $1
        ORDER BY week_number
        ",
    )
    .bind(meso_cycle_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(weeks)
}

/// Return the week with this number, creating it with `week_split` if absent
///
/// Returns the week and whether this call created it.
///
/// # Errors
///
/// Returns an error if the insert or lookup fails
pub async fn insert_or_fetch_week(
    conn: &mut SqliteConnection,
    meso_cycle_id: i64,
    week_number: i64,
    week_split: &WeekSplit,
) -> AppResult<(TrainingWeek, bool)> {
    let outcome = sqlx::query(
        r"
        INSERT INTO training_weeks (meso_cycle_id, week_number, week_split)
        VALUES ($1, $2, $3)
        ON CONFLICT(meso_cycle_id, week_number) DO NOTHING
        ",
    )
    .bind(meso_cycle_id)
    .bind(week_number)
    .bind(week_split.to_string())
    .execute(&mut *conn)
    .await;
    let created = inserted_row_id(outcome)?.is_some();

    let week = find_week(conn, meso_cycle_id, week_number)
        .await?
        .ok_or_else(|| AppError::internal(format!("Week {week_number} vanished after insert")))?;
    Ok((week, created))
}

/// Find the session of a week on a weekday
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn find_session(
    conn: &mut SqliteConnection,
    training_week_id: i64,
    day: Weekday,
) -> AppResult<Option<TrainingSession>> {
    let session = sqlx::query_as::<_, TrainingSession>(
        r"
        SELECT id, training_week_id, name, day_of_week
        FROM training_sessions
        WHERE training_week_id = $1 AND day_of_week = $2
        ",
    )
    .bind(training_week_id)
    .bind(i64::from(day))
    .fetch_optional(&mut *conn)
    .await?;

    Ok(session)
}

/// Sessions of a week ordered by weekday
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn list_sessions(
    conn: &mut SqliteConnection,
    training_week_id: i64,
) -> AppResult<Vec<TrainingSession>> {
    let sessions = sqlx::query_as::<_, TrainingSession>(
        r"
        SELECT id, training_week_id, name, day_of_week
        FROM training_sessions
        WHERE training_week_id = $1
        ORDER BY day_of_week
        ",
    )
    .bind(training_week_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(sessions)
}

/// Return the session of a week on a weekday, creating it named `name` if absent
///
/// Returns the session and whether this call created it. An existing session
/// keeps its original name.
///
/// # Errors
///
/// Returns an error if the insert or lookup fails
pub async fn insert_or_fetch_session(
    conn: &mut SqliteConnection,
    training_week_id: i64,
    day: Weekday,
    name: &str,
) -> AppResult<(TrainingSession, bool)> {
    let outcome = sqlx::query(
        r"
        INSERT INTO training_sessions (training_week_id, name, day_of_week)
        VALUES ($1, $2, $3)
        ON CONFLICT(training_week_id, day_of_week) DO NOTHING
        ",
    )
    .bind(training_week_id)
    .bind(name)
    .bind(i64::from(day))
    .execute(&mut *conn)
    .await;
    let created = inserted_row_id(outcome)?.is_some();

    let session = find_session(conn, training_week_id, day)
        .await?
        .ok_or_else(|| AppError::internal(format!("Session on {day} vanished after insert")))?;
    Ok((session, created))
}
