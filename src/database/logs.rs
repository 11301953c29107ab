// ABOUTME: Append-only storage for exercise log rows
// ABOUTME: Inserts one row per logged exercise and lists a user's history newest first

use super::Database;
use crate::errors::AppResult;
use crate::models::{Log, RepScheme};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, SqliteConnection};

impl Database {
    /// Create the logs table and its lookup indexes
    ///
    /// Program, mesocycle, week, and session references are nullable so logs
    /// recorded outside a program stay valid.
    ///
    /// # Errors
    ///
    /// Returns an error if the table or an index cannot be created
    pub(super) async fn migrate_logs(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id),
                program_id INTEGER REFERENCES programs(id),
                mesocycle_id INTEGER REFERENCES meso_cycles(id),
                exercise_id INTEGER NOT NULL REFERENCES exercises(id),
                training_week_id INTEGER REFERENCES training_weeks(id),
                training_session_id INTEGER REFERENCES training_sessions(id),
                load REAL NOT NULL,
                sets INTEGER NOT NULL,
                reps TEXT NOT NULL,
                rir INTEGER NOT NULL,
                timestamp TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_logs_user_id ON logs(user_id)")
            .execute(&self.pool)
            .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_logs_program_id ON logs(program_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

/// Values for a log row that is about to be written
#[derive(Debug, Clone, PartialEq)]
pub struct NewLog {
    /// Who trained
    pub user_id: i64,
    /// Program, when logged against one
    pub program_id: Option<i64>,
    /// Mesocycle of that program
    pub mesocycle_id: Option<i64>,
    /// Exercise performed
    pub exercise_id: i64,
    /// Resolved week
    pub training_week_id: Option<i64>,
    /// Resolved session
    pub training_session_id: Option<i64>,
    /// Load per rep
    pub load: f64,
    /// Set count as submitted
    pub sets: i64,
    /// Per-set reps as submitted
    pub reps: RepScheme,
    /// Reps in reserve
    pub rir: i64,
    /// Submission time
    pub timestamp: DateTime<Utc>,
}

/// Insert one log row
///
/// # Errors
///
/// Returns an error if the insert fails, including foreign key violations
pub async fn insert_log(conn: &mut SqliteConnection, log: NewLog) -> AppResult<Log> {
    let done = sqlx::query(
        r"
        INSERT INTO logs (
            user_id, program_id, mesocycle_id, exercise_id, training_week_id,
            training_session_id, load, sets, reps, rir, timestamp
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        ",
    )
    .bind(log.user_id)
    .bind(log.program_id)
    .bind(log.mesocycle_id)
    .bind(log.exercise_id)
    .bind(log.training_week_id)
    .bind(log.training_session_id)
    .bind(log.load)
    .bind(log.sets)
    .bind(log.reps.to_string())
    .bind(log.rir)
    .bind(log.timestamp)
    .execute(&mut *conn)
    .await?;

    Ok(Log {
        id: done.last_insert_rowid(),
        user_id: log.user_id,
        program_id: log.program_id,
        mesocycle_id: log.mesocycle_id,
        exercise_id: log.exercise_id,
        training_week_id: log.training_week_id,
        training_session_id: log.training_session_id,
        load: log.load,
        sets: log.sets,
        reps: log.reps,
        rir: log.rir,
        timestamp: log.timestamp,
    })
}

/// Logs of a program, oldest first
///
/// # Errors
///
/// Returns an error if the query fails or a stored rep scheme is malformed
pub async fn list_program_logs(conn: &mut SqliteConnection, program_id: i64) -> AppResult<Vec<Log>> {
    let logs = sqlx::query_as::<_, Log>(
        r"
        SELECT id, user_id, program_id, mesocycle_id, exercise_id, training_week_id,
               training_session_id, load, sets, reps, rir, timestamp
        FROM logs
        WHERE program_id = $1
        ORDER BY id
        ",
    )
    .bind(program_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(logs)
}

/// A log joined with the names needed to display it
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct LogHistoryRow {
    /// Log id
    pub id: i64,
    /// Submission time
    pub timestamp: DateTime<Utc>,
    /// Exercise name
    pub exercise_name: String,
    /// Program name, if logged against a program
    pub program_name: Option<String>,
    /// Week number, if resolved
    pub week_number: Option<i64>,
    /// Session name, if resolved
    pub session_name: Option<String>,
    /// Load per rep
    pub load: f64,
    /// Set count
    pub sets: i64,
    /// Comma-joined per-set reps
    pub reps: String,
    /// Reps in reserve
    pub rir: i64,
}

/// A user's logs, newest first
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn list_user_history(
    conn: &mut SqliteConnection,
    user_id: i64,
    limit: i64,
) -> AppResult<Vec<LogHistoryRow>> {
    let rows = sqlx::query_as::<_, LogHistoryRow>(
        r"
        SELECT l.id, l.timestamp, e.exercise_name, p.name AS program_name,
               w.week_number, s.name AS session_name, l.load, l.sets, l.reps, l.rir
        FROM logs l
        JOIN exercises e ON e.id = l.exercise_id
        LEFT JOIN programs p ON p.id = l.program_id
        LEFT JOIN training_weeks w ON w.id = l.training_week_id
        LEFT JOIN training_sessions s ON s.id = l.training_session_id
        WHERE l.user_id = $1
        ORDER BY l.timestamp DESC, l.id DESC
        LIMIT $2
        ",
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows)
}
