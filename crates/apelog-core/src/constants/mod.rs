// ABOUTME: Application-wide constants organized by domain
// ABOUTME: User-facing messages, session settings, defaults, and dashboard sentinels
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants shared by the server and the analytics crate

/// User-facing validation messages returned as plain text with HTTP 200
pub mod error_messages {
    /// Prefix carried by every account validation message
    pub const BAD_APE_PREFIX: &str = "BAD APE! ";
    /// Registration or login without a username
    pub const MISSING_USERNAME: &str = "BAD APE! Missing username";
    /// Registration or login without a password
    pub const MISSING_PASSWORD: &str = "BAD APE! Missing password";
    /// Registration where password and confirmation differ
    pub const PASSWORD_MISMATCH: &str = "BAD APE! Passwords do not match";
    /// Registration with a username someone already holds
    pub const USERNAME_TAKEN: &str = "BAD APE! Username already taken";
    /// Login with unknown user or wrong password
    pub const INVALID_CREDENTIALS: &str = "BAD APE! Invalid username and/or password";
    /// Log submission against a program whose mesocycle is missing
    pub const MESOCYCLE_NOT_FOUND: &str = "MesoCycle not found for the given program";
    /// Log submission when week 1 was never provisioned
    pub const WEEK_ONE_NOT_FOUND: &str = "Week 1 not found for the given mesocycle";
    /// JSON endpoints for an unknown program id
    pub const PROGRAM_NOT_FOUND: &str = "Program not found";
    /// Dashboard response when the filters match no logs
    pub const NO_DATA: &str = "No data for the selected filters";
}

/// Session cookie settings
pub mod session {
    /// Name of the cookie carrying the signed session token
    pub const COOKIE_NAME: &str = "session";
    /// Default session lifetime
    pub const DEFAULT_EXPIRY_HOURS: i64 = 24;
    /// Audience claim for session tokens
    pub const AUDIENCE: &str = "apelog-web";
}

/// Default configuration values
pub mod defaults {
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 8081;
    /// Default bind address
    pub const HOST: &str = "127.0.0.1";
    /// Default SQLite database location
    pub const DATABASE_URL: &str = "sqlite:./data/apelog.db";
    /// Service name used in structured logs
    pub const SERVICE_NAME: &str = "apelog";
}

/// Schedule encoding
pub mod schedule {
    /// Separator for serialized week splits and rep schemes
    pub const LIST_SEPARATOR: char = ',';
    /// First weekday index (Monday)
    pub const FIRST_WEEKDAY: u8 = 1;
    /// Last weekday index (Sunday)
    pub const LAST_WEEKDAY: u8 = 7;
    /// Week number every mesocycle starts with; later weeks copy its split
    pub const FIRST_WEEK: i64 = 1;
}

/// Dashboard filter sentinels
pub mod dashboard {
    /// Value that disables the week or session equality filter
    pub const ALL: &str = "all";
}

/// HTTP layer limits
pub mod http {
    /// Requests taking longer than this are answered with 408
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
    /// Largest accepted request body
    pub const MAX_BODY_BYTES: usize = 256 * 1024;
}
