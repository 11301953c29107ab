// ABOUTME: Training domain entities: programs, mesocycles, weeks, sessions, exercises, and logs
// ABOUTME: Also defines the inputs for program provisioning and log batch submission
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::schedule::{RepScheme, WeekSplit, Weekday};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A named exercise; created lazily the first time a log mentions it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-types", derive(sqlx::FromRow))]
pub struct Exercise {
    /// Row id
    pub id: i64,
    /// Globally unique, case-sensitive name
    #[cfg_attr(feature = "sqlx-types", sqlx(rename = "exercise_name"))]
    pub name: String,
    /// Free-text description
    pub description: Option<String>,
}

/// Root of a training plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-types", derive(sqlx::FromRow))]
pub struct Program {
    /// Row id
    pub id: i64,
    /// Display name
    pub name: String,
}

/// Multi-week training block; exactly one per program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-types", derive(sqlx::FromRow))]
pub struct MesoCycle {
    /// Row id
    pub id: i64,
    /// Owning program
    pub program_id: i64,
    /// First day of week 1
    pub start_date: NaiveDate,
    /// Number of weeks declared at creation
    pub total_weeks: i64,
}

/// One numbered week of a mesocycle with its training days
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-types", derive(sqlx::FromRow))]
pub struct TrainingWeek {
    /// Row id
    pub id: i64,
    /// Owning mesocycle
    pub meso_cycle_id: i64,
    /// 1-based, unique within the mesocycle
    pub week_number: i64,
    /// Training days; later weeks inherit week 1's split
    #[cfg_attr(feature = "sqlx-types", sqlx(try_from = "String"))]
    pub week_split: WeekSplit,
}

/// A training occurrence on one weekday of one week
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-types", derive(sqlx::FromRow))]
pub struct TrainingSession {
    /// Row id
    pub id: i64,
    /// Owning week
    pub training_week_id: i64,
    /// Session label, e.g. "Upper Body"
    pub name: String,
    /// At most one session per (week, weekday)
    #[cfg_attr(feature = "sqlx-types", sqlx(try_from = "i64"))]
    pub day_of_week: Weekday,
}

/// Immutable record of one exercise performed in one session
///
/// Program, mesocycle, week, and session references are nullable for logs that
/// predate programs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-types", derive(sqlx::FromRow))]
pub struct Log {
    /// Row id
    pub id: i64,
    /// Who trained
    pub user_id: i64,
    /// Program the log was submitted against
    pub program_id: Option<i64>,
    /// Mesocycle of that program
    pub mesocycle_id: Option<i64>,
    /// Exercise performed
    pub exercise_id: i64,
    /// Week the session belongs to
    pub training_week_id: Option<i64>,
    /// Session the log belongs to
    pub training_session_id: Option<i64>,
    /// Load per rep
    pub load: f64,
    /// Number of sets, as submitted
    pub sets: i64,
    /// Per-set reps, as submitted; not cross-checked against `sets`
    #[cfg_attr(feature = "sqlx-types", sqlx(try_from = "String"))]
    pub reps: RepScheme,
    /// Reps in reserve
    pub rir: i64,
    /// Submission time
    pub timestamp: DateTime<Utc>,
}

/// Input for provisioning a program with its mesocycle and first week
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProgram {
    /// Program name
    pub name: String,
    /// Mesocycle start date
    pub start_date: NaiveDate,
    /// Declared number of weeks; not validated
    pub total_weeks: i64,
    /// Week 1 training days
    pub training_days: WeekSplit,
}

/// One exercise row of a log submission
///
/// Numeric fields are `None` when the form left them blank.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    /// Exercise name, matched exactly
    pub exercise_name: String,
    /// Load per rep
    pub load: Option<f64>,
    /// Set count
    pub sets: Option<i64>,
    /// Reps in reserve
    pub rir: Option<i64>,
    /// Per-set rep counts
    pub reps: RepScheme,
}

impl LogEntry {
    /// Whether this entry carries every required value
    ///
    /// A zero load, set count, or RIR counts as "not provided", the same as a blank
    /// field, so an entry with RIR 0 is dropped. Submitting clients rely on this.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.exercise_name.trim().is_empty()
            && self.load.is_some_and(|load| load != 0.0)
            && self.sets.is_some_and(|sets| sets != 0)
            && self.rir.is_some_and(|rir| rir != 0)
    }
}

/// Everything needed to persist one log submission
#[derive(Debug, Clone, PartialEq)]
pub struct LogBatch {
    /// Submitting user
    pub user_id: i64,
    /// Program the logs belong to
    pub program_id: i64,
    /// Target week; created from week 1 when absent
    pub week_number: i64,
    /// Target weekday; its session is created when absent
    pub session_day: Weekday,
    /// Name for a newly created session
    pub session_name: Option<String>,
    /// Exercise rows in form order
    pub entries: Vec<LogEntry>,
}
