// ABOUTME: Conversion from sqlx errors into the unified AppError taxonomy
// ABOUTME: Classifies unique-constraint violations so callers can re-fetch instead of failing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{AppError, ErrorCode};

/// True when the database rejected a write because of a UNIQUE constraint
#[must_use]
pub fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .is_some_and(|db_error| db_error.is_unique_violation())
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        if is_unique_violation(&error) {
            return Self::new(ErrorCode::ResourceAlreadyExists, error.to_string()).with_source(error);
        }
        if matches!(error, sqlx::Error::RowNotFound) {
            return Self::new(ErrorCode::ResourceNotFound, "Row not found").with_source(error);
        }
        tracing::error!(error = %error, "Database operation failed");
        Self::database(error.to_string()).with_source(error)
    }
}
