// ABOUTME: Core data models for the training tracker
// ABOUTME: Re-exports entities, schedule value types, and submission inputs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! The relational chain is Program → `MesoCycle` → `TrainingWeek` →
//! `TrainingSession` → `Log`, with `User` and `Exercise` referenced by every log.

mod schedule;
mod training;
mod user;

pub use schedule::{RepScheme, WeekSplit, Weekday};
pub use training::{
    Exercise, Log, LogBatch, LogEntry, MesoCycle, NewProgram, Program, TrainingSession,
    TrainingWeek,
};
pub use user::User;
