// ABOUTME: User account storage operations
// ABOUTME: Creates the users table and looks accounts up by name or id

use super::Database;
use crate::errors::{is_unique_violation, AppError, AppResult};
use crate::models::User;
use sqlx::SqliteConnection;

impl Database {
    /// Create the users table
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be created
    pub(super) async fn migrate_users(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_name TEXT NOT NULL UNIQUE,
                hash TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Insert a new account
///
/// # Errors
///
/// Returns `ResourceAlreadyExists` when the name is taken, or a database error
pub async fn create_user(
    conn: &mut SqliteConnection,
    user_name: &str,
    password_hash: &str,
) -> AppResult<User> {
    let result = sqlx::query("INSERT INTO users (user_name, hash) VALUES ($1, $2)")
        .bind(user_name)
        .bind(password_hash)
        .execute(&mut *conn)
        .await;

    match result {
        Ok(done) => Ok(User {
            id: done.last_insert_rowid(),
            user_name: user_name.to_owned(),
            password_hash: password_hash.to_owned(),
        }),
        Err(e) if is_unique_violation(&e) => Err(AppError::already_exists(format!(
            "User '{user_name}'"
        ))),
        Err(e) => Err(e.into()),
    }
}

/// Find an account by exact name
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn find_user_by_name(
    conn: &mut SqliteConnection,
    user_name: &str,
) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, user_name, hash FROM users WHERE user_name = $1",
    )
    .bind(user_name)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(user)
}

/// Find an account by id
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn get_user(conn: &mut SqliteConnection, user_id: i64) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT id, user_name, hash FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(user)
}
