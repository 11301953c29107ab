// ABOUTME: Account registration and login rules
// ABOUTME: Produces the user-facing "BAD APE!" rejections or an authenticated user

use crate::auth::{hash_password, verify_password};
use crate::constants::error_messages::{
    INVALID_CREDENTIALS, MISSING_PASSWORD, MISSING_USERNAME, PASSWORD_MISMATCH, USERNAME_TAKEN,
};
use crate::database::{users, Database};
use crate::errors::AppResult;
use crate::logging::AppLogger;
use crate::models::User;

/// Registration form values
#[derive(Debug, Clone, Default)]
pub struct Registration {
    /// Requested login name
    pub user_name: String,
    /// Chosen password
    pub password: String,
    /// Password typed a second time
    pub confirm_password: String,
}

/// Result of a register or login attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountOutcome {
    /// Credentials accepted; the caller should start a session
    Authenticated(User),
    /// Input rejected with a message meant for the user
    Rejected(&'static str),
}

/// Field checks that need no database access, in the order they are reported
#[must_use]
pub fn check_registration(form: &Registration) -> Option<&'static str> {
    if form.user_name.trim().is_empty() {
        Some(MISSING_USERNAME)
    } else if form.password.is_empty() {
        Some(MISSING_PASSWORD)
    } else if form.password != form.confirm_password {
        Some(PASSWORD_MISMATCH)
    } else {
        None
    }
}

/// Create an account
///
/// # Errors
///
/// Returns an error only for storage or hashing failures; bad input is an
/// [`AccountOutcome::Rejected`]
pub async fn register(database: &Database, form: &Registration) -> AppResult<AccountOutcome> {
    if let Some(message) = check_registration(form) {
        return Ok(AccountOutcome::Rejected(message));
    }
    let user_name = form.user_name.trim();

    let taken = {
        let mut conn = database.acquire().await?;
        users::find_user_by_name(&mut conn, user_name).await?.is_some()
    };
    if taken {
        AppLogger::log_auth_event(user_name, "register", false);
        return Ok(AccountOutcome::Rejected(USERNAME_TAKEN));
    }

    let hash = hash_password(form.password.clone()).await?;
    let mut conn = database.acquire().await?;
    match users::create_user(&mut conn, user_name, &hash).await {
        Ok(user) => {
            AppLogger::log_auth_event(user_name, "register", true);
            Ok(AccountOutcome::Authenticated(user))
        }
        Err(e) if e.is_conflict() => Ok(AccountOutcome::Rejected(USERNAME_TAKEN)),
        Err(e) => Err(e),
    }
}

/// Check credentials
///
/// # Errors
///
/// Returns an error only for storage or hashing failures
pub async fn login(database: &Database, user_name: &str, password: &str) -> AppResult<AccountOutcome> {
    let user_name = user_name.trim();
    if user_name.is_empty() {
        return Ok(AccountOutcome::Rejected(MISSING_USERNAME));
    }
    if password.is_empty() {
        return Ok(AccountOutcome::Rejected(MISSING_PASSWORD));
    }

    let found = {
        let mut conn = database.acquire().await?;
        users::find_user_by_name(&mut conn, user_name).await?
    };
    let Some(user) = found else {
        AppLogger::log_auth_event(user_name, "login", false);
        return Ok(AccountOutcome::Rejected(INVALID_CREDENTIALS));
    };

    let valid = verify_password(password.to_owned(), user.password_hash.clone()).await?;
    AppLogger::log_auth_event(user_name, "login", valid);
    if valid {
        Ok(AccountOutcome::Authenticated(user))
    } else {
        Ok(AccountOutcome::Rejected(INVALID_CREDENTIALS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(user_name: &str, password: &str, confirm: &str) -> Registration {
        Registration {
            user_name: user_name.to_owned(),
            password: password.to_owned(),
            confirm_password: confirm.to_owned(),
        }
    }

    #[test]
    fn test_registration_checks_in_order() {
        assert_eq!(check_registration(&form("", "", "x")), Some(MISSING_USERNAME));
        assert_eq!(check_registration(&form("ape", "", "")), Some(MISSING_PASSWORD));
        assert_eq!(
            check_registration(&form("ape", "banana", "bananas")),
            Some(PASSWORD_MISMATCH)
        );
        assert_eq!(check_registration(&form("ape", "banana", "banana")), None);
    }
}
