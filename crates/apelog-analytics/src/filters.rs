// ABOUTME: Dashboard filter values and the "all" sentinel handling
// ABOUTME: Parses week, session, and metric selectors coming from query strings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use apelog_core::constants::dashboard::ALL;
use apelog_core::errors::{AppError, AppResult};
use apelog_core::models::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which metric a series reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// load × sets × total reps, summed per week and exercise
    Volume,
    /// load summed per week and exercise
    Load,
    /// every set's rep count, keyed by week, exercise, and set position
    Reps,
}

impl Metric {
    /// Selector value used by the dashboard
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Volume => "volume",
            Self::Load => "load",
            Self::Reps => "reps",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "volume" => Ok(Self::Volume),
            "load" => Ok(Self::Load),
            "reps" => Ok(Self::Reps),
            other => Err(AppError::invalid_format("metric", other)),
        }
    }
}

/// Week selector: a single week number or every week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeekFilter {
    /// No equality filter on week number
    #[default]
    All,
    /// Only this week number
    Number(i64),
}

impl WeekFilter {
    /// Week number to bind, `None` for all weeks
    #[must_use]
    pub const fn number(self) -> Option<i64> {
        match self {
            Self::All => None,
            Self::Number(week) => Some(week),
        }
    }
}

impl FromStr for WeekFilter {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL) {
            return Ok(Self::All);
        }
        trimmed
            .parse::<i64>()
            .map(Self::Number)
            .map_err(|_| AppError::invalid_format("week", trimmed))
    }
}

/// Session selector: sessions on one weekday, or every session
///
/// Sessions are matched by weekday so the filter stays meaningful across weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionFilter {
    /// No equality filter on session
    #[default]
    All,
    /// Only sessions held on this weekday
    Day(Weekday),
}

impl SessionFilter {
    /// Weekday index to bind, `None` for all sessions
    #[must_use]
    pub fn day(self) -> Option<i64> {
        match self {
            Self::All => None,
            Self::Day(day) => Some(i64::from(day)),
        }
    }
}

impl FromStr for SessionFilter {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL) {
            return Ok(Self::All);
        }
        trimmed.parse::<Weekday>().map(Self::Day)
    }
}
