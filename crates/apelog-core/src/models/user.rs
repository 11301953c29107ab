// ABOUTME: User account model
// ABOUTME: Username plus bcrypt password hash; owns training logs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::Serialize;

/// Registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "sqlx-types", derive(sqlx::FromRow))]
pub struct User {
    /// Row id
    pub id: i64,
    /// Unique login name
    pub user_name: String,
    /// Password hash, never serialized
    #[serde(skip_serializing)]
    #[cfg_attr(feature = "sqlx-types", sqlx(rename = "hash"))]
    pub password_hash: String,
}
