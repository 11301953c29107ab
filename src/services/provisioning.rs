// ABOUTME: Program provisioning and lazy week/session resolution
// ABOUTME: Creates program -> mesocycle -> week 1 atomically and derives later weeks from week 1

use crate::constants::error_messages::{MESOCYCLE_NOT_FOUND, PROGRAM_NOT_FOUND, WEEK_ONE_NOT_FOUND};
use crate::constants::schedule::FIRST_WEEK;
use crate::database::{programs, Database};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::logging::AppLogger;
use crate::models::{
    MesoCycle, NewProgram, Program, TrainingSession, TrainingWeek, WeekSplit, Weekday,
};
use serde::Serialize;
use sqlx::SqliteConnection;

/// Rows written when a program is created
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisionedProgram {
    /// The new program
    pub program: Program,
    /// Its only mesocycle
    pub meso_cycle: MesoCycle,
    /// Week 1, carrying the submitted training days
    pub first_week: TrainingWeek,
}

/// Create a program with its mesocycle and week 1 in one transaction
///
/// Week count and training days are stored as given.
///
/// # Errors
///
/// Returns an error if any insert fails; nothing is written in that case
pub async fn create_program(database: &Database, new: &NewProgram) -> AppResult<ProvisionedProgram> {
    let mut tx = database.begin().await?;

    let program = programs::insert_program(&mut tx, &new.name).await?;
    let meso_cycle =
        programs::insert_mesocycle(&mut tx, program.id, new.start_date, new.total_weeks).await?;
    let first_week =
        programs::insert_week(&mut tx, meso_cycle.id, FIRST_WEEK, &new.training_days).await?;

    tx.commit().await?;

    AppLogger::log_provisioning("program", program.id, 0, &program.name);
    AppLogger::log_provisioning(
        "training_week",
        first_week.id,
        meso_cycle.id,
        &format!("week {FIRST_WEEK} split {}", first_week.week_split),
    );

    Ok(ProvisionedProgram {
        program,
        meso_cycle,
        first_week,
    })
}

/// Find the week to attach logs to, creating it from week 1's split if absent
///
/// # Errors
///
/// Returns `InvalidInput` for a week number below 1, and `InvalidReference`
/// when the program has no mesocycle or its week 1 is missing
pub async fn resolve_week(
    conn: &mut SqliteConnection,
    program_id: i64,
    week_number: i64,
) -> AppResult<(MesoCycle, TrainingWeek)> {
    if week_number < FIRST_WEEK {
        return Err(AppError::invalid_input(format!(
            "Week number must be at least {FIRST_WEEK}, got {week_number}"
        )));
    }

    let meso = programs::find_mesocycle(conn, program_id)
        .await?
        .ok_or_else(|| AppError::invalid_reference(MESOCYCLE_NOT_FOUND))?;

    if let Some(week) = programs::find_week(conn, meso.id, week_number).await? {
        return Ok((meso, week));
    }

    let template = programs::find_week(conn, meso.id, FIRST_WEEK)
        .await?
        .ok_or_else(|| AppError::invalid_reference(WEEK_ONE_NOT_FOUND))?;

    let (week, created) =
        programs::insert_or_fetch_week(conn, meso.id, week_number, &template.week_split).await?;
    if created {
        AppLogger::log_provisioning(
            "training_week",
            week.id,
            meso.id,
            &format!("week {week_number} split {}", week.week_split),
        );
    }

    Ok((meso, week))
}

/// Name given to a session created without one
#[must_use]
pub fn default_session_name(week_number: i64, day: Weekday) -> String {
    format!("Week {week_number} - {}", day.name())
}

/// Find the week's session on `day`, creating it if absent
///
/// A blank `name` falls back to [`default_session_name`]. An existing session
/// keeps its name.
///
/// # Errors
///
/// Returns an error if the insert or lookup fails
pub async fn resolve_session(
    conn: &mut SqliteConnection,
    week: &TrainingWeek,
    day: Weekday,
    name: Option<&str>,
) -> AppResult<TrainingSession> {
    if let Some(session) = programs::find_session(conn, week.id, day).await? {
        return Ok(session);
    }

    let name = name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map_or_else(|| default_session_name(week.week_number, day), str::to_owned);

    let (session, created) = programs::insert_or_fetch_session(conn, week.id, day, &name).await?;
    if created {
        AppLogger::log_provisioning("training_session", session.id, week.id, &session.name);
    }
    Ok(session)
}

fn program_not_found() -> AppError {
    AppError::new(ErrorCode::ResourceNotFound, PROGRAM_NOT_FOUND)
}

/// Week 1's training days for a program
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown program and `InvalidReference`
/// when its mesocycle or week 1 is missing
pub async fn training_days(database: &Database, program_id: i64) -> AppResult<WeekSplit> {
    let mut conn = database.acquire().await?;
    programs::find_program(&mut conn, program_id)
        .await?
        .ok_or_else(program_not_found)?;

    let meso = programs::find_mesocycle(&mut conn, program_id)
        .await?
        .ok_or_else(|| AppError::invalid_reference(MESOCYCLE_NOT_FOUND))?;
    let week = programs::find_week(&mut conn, meso.id, FIRST_WEEK)
        .await?
        .ok_or_else(|| AppError::invalid_reference(WEEK_ONE_NOT_FOUND))?;

    Ok(week.week_split)
}

/// The week count declared when the program was created
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown program and `InvalidReference`
/// when its mesocycle is missing
pub async fn total_weeks(database: &Database, program_id: i64) -> AppResult<i64> {
    let mut conn = database.acquire().await?;
    programs::find_program(&mut conn, program_id)
        .await?
        .ok_or_else(program_not_found)?;

    programs::find_mesocycle(&mut conn, program_id)
        .await?
        .map(|meso| meso.total_weeks)
        .ok_or_else(|| AppError::invalid_reference(MESOCYCLE_NOT_FOUND))
}

/// A program with its name, for the log form
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown program
pub async fn get_program(database: &Database, program_id: i64) -> AppResult<Program> {
    let mut conn = database.acquire().await?;
    programs::find_program(&mut conn, program_id)
        .await?
        .ok_or_else(program_not_found)
}

/// All programs, oldest first
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn list_programs(database: &Database) -> AppResult<Vec<Program>> {
    let mut conn = database.acquire().await?;
    programs::list_programs(&mut conn).await
}

/// A week with its sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekLayout {
    /// The week
    pub week: TrainingWeek,
    /// Its sessions by weekday
    pub sessions: Vec<TrainingSession>,
}

/// A program's full structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgramLayout {
    /// The program
    pub program: Program,
    /// Its mesocycle, absent only for rows written outside provisioning
    pub meso_cycle: Option<MesoCycle>,
    /// Weeks in order
    pub weeks: Vec<WeekLayout>,
}

/// Every program with its mesocycle, weeks, and sessions
///
/// # Errors
///
/// Returns an error if a query fails
pub async fn program_layouts(database: &Database) -> AppResult<Vec<ProgramLayout>> {
    let mut conn = database.acquire().await?;
    let mut layouts = Vec::new();

    for program in programs::list_programs(&mut conn).await? {
        let meso_cycle = programs::find_mesocycle(&mut conn, program.id).await?;
        let mut weeks = Vec::new();
        if let Some(meso) = &meso_cycle {
            for week in programs::list_weeks(&mut conn, meso.id).await? {
                let sessions = programs::list_sessions(&mut conn, week.id).await?;
                weeks.push(WeekLayout { week, sessions });
            }
        }
        layouts.push(ProgramLayout {
            program,
            meso_cycle,
            weeks,
        });
    }

    Ok(layouts)
}
