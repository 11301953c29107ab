// ABOUTME: Training log aggregation engine for the apelog dashboard
// ABOUTME: Turns joined log rows into volume, load, and reps-per-set series
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Apelog Analytics
//!
//! The server fetches log rows matching a dashboard filter and hands them to
//! [`aggregate`]. Nothing here touches the database, so the math is unit tested
//! and benchmarked in isolation.

/// Dashboard filter selectors (metric, week, session)
pub mod filters;

/// Series aggregation over joined log rows
pub mod series;

pub use filters::{Metric, SessionFilter, WeekFilter};
pub use series::{aggregate, LogRow, Series, SeriesPoint};
