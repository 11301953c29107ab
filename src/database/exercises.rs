// ABOUTME: Exercise catalogue storage with atomic insert-or-fetch by name
// ABOUTME: Exercises are created lazily the first time a log names them

use super::{inserted_row_id, Database};
use crate::errors::{AppError, AppResult};
use crate::models::Exercise;
use sqlx::SqliteConnection;
use tracing::{debug, info};

impl Database {
    /// Create the exercises table
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be created
    pub(super) async fn migrate_exercises(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS exercises (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                exercise_name TEXT NOT NULL UNIQUE,
                description TEXT
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Find an exercise by exact, case-sensitive name
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn find_exercise(conn: &mut SqliteConnection, name: &str) -> AppResult<Option<Exercise>> {
    let exercise = sqlx::query_as::<_, Exercise>(
        "SELECT id, exercise_name, description FROM exercises WHERE exercise_name = $1",
    )
    .bind(name)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(exercise)
}

/// Return the exercise with this exact name, creating it if absent
///
/// The insert is `ON CONFLICT DO NOTHING`, so a concurrent writer that created
/// the same name first makes this call fall through to the lookup. A unique
/// violation that still surfaces is treated the same way.
///
/// # Errors
///
/// Returns an error if the insert or lookup fails
pub async fn upsert_exercise(conn: &mut SqliteConnection, name: &str) -> AppResult<Exercise> {
    if let Some(existing) = find_exercise(conn, name).await? {
        return Ok(existing);
    }

    let outcome = sqlx::query(
        "INSERT INTO exercises (exercise_name) VALUES ($1) ON CONFLICT(exercise_name) DO NOTHING",
    )
    .bind(name)
    .execute(&mut *conn)
    .await;

    match inserted_row_id(outcome)? {
        Some(id) => info!(exercise.id = id, exercise.name = %name, "Exercise created"),
        None => debug!(exercise.name = %name, "Exercise created concurrently; re-fetching"),
    }

    find_exercise(conn, name)
        .await?
        .ok_or_else(|| AppError::internal(format!("Exercise '{name}' vanished after insert")))
}

/// All exercises ordered by name
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn list_exercises(conn: &mut SqliteConnection) -> AppResult<Vec<Exercise>> {
    let exercises = sqlx::query_as::<_, Exercise>(
        "SELECT id, exercise_name, description FROM exercises ORDER BY exercise_name",
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(exercises)
}
