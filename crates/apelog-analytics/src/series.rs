// ABOUTME: Builds volume, load, and reps-per-set series from joined log rows
// ABOUTME: Pure functions over already-fetched rows, ordered by week then exercise
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::filters::Metric;
use apelog_core::models::RepScheme;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// One log joined with its week number and exercise name
#[derive(Debug, Clone, PartialEq)]
pub struct LogRow {
    /// Week the log was recorded in
    pub week_number: i64,
    /// Exercise name
    pub exercise: String,
    /// Load per rep
    pub load: f64,
    /// Submitted set count
    pub sets: i64,
    /// Per-set reps
    pub reps: RepScheme,
}

impl LogRow {
    /// load × sets × sum of per-set reps
    #[must_use]
    pub fn volume(&self) -> f64 {
        // Safe: set and rep counts are small human-entered numbers
        #[allow(clippy::cast_precision_loss)]
        let (sets, reps) = (self.sets as f64, self.reps.total() as f64);
        self.load * sets * reps
    }
}

/// One plotted value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    /// X axis
    pub week_number: i64,
    /// Series key
    pub exercise: String,
    /// 1-based set index; only set for the reps metric
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_position: Option<u32>,
    /// Y axis
    pub value: f64,
}

/// A metric's points for one filter selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    /// Metric the points measure
    pub metric: Metric,
    /// Points ordered by week, exercise, then set position
    pub points: Vec<SeriesPoint>,
}

impl Series {
    /// True when no log matched the filters
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Aggregate rows into the requested metric
#[must_use]
pub fn aggregate(metric: Metric, rows: &[LogRow]) -> Series {
    let points = match metric {
        Metric::Volume => sum_per_week_and_exercise(rows, LogRow::volume),
        Metric::Load => sum_per_week_and_exercise(rows, |row| row.load),
        Metric::Reps => reps_per_set(rows),
    };
    debug!(metric = %metric, rows = rows.len(), points = points.len(), "Aggregated series");
    Series { metric, points }
}

fn sum_per_week_and_exercise(rows: &[LogRow], value: impl Fn(&LogRow) -> f64) -> Vec<SeriesPoint> {
    let mut buckets: BTreeMap<(i64, &str), f64> = BTreeMap::new();
    for row in rows {
        *buckets
            .entry((row.week_number, row.exercise.as_str()))
            .or_insert(0.0) += value(row);
    }

    buckets
        .into_iter()
        .map(|((week_number, exercise), value)| SeriesPoint {
            week_number,
            exercise: exercise.to_owned(),
            set_position: None,
            value,
        })
        .collect()
}

fn reps_per_set(rows: &[LogRow]) -> Vec<SeriesPoint> {
    let mut groups: BTreeMap<(i64, &str, u32), Vec<u32>> = BTreeMap::new();
    for row in rows {
        for (position, &reps) in (1u32..).zip(row.reps.per_set()) {
            groups
                .entry((row.week_number, row.exercise.as_str(), position))
                .or_default()
                .push(reps);
        }
    }

    groups
        .into_iter()
        .flat_map(|((week_number, exercise, position), reps)| {
            reps.into_iter().map(move |value| SeriesPoint {
                week_number,
                exercise: exercise.to_owned(),
                set_position: Some(position),
                value: f64::from(value),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(week: i64, exercise: &str, load: f64, reps: &[u32]) -> LogRow {
        LogRow {
            week_number: week,
            exercise: exercise.to_owned(),
            load,
            sets: i64::try_from(reps.len()).unwrap(),
            reps: RepScheme::new(reps.to_vec()),
        }
    }

    #[test]
    fn test_volume_of_single_log() {
        let series = aggregate(Metric::Volume, &[row(1, "Squat", 100.0, &[10, 10, 8])]);
        assert_eq!(series.points.len(), 1);
        assert!((series.points[0].value - 8400.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_volume_uses_submitted_sets_not_rep_count() {
        let mut log = row(1, "Squat", 50.0, &[10, 10]);
        log.sets = 3;
        assert!((log.volume() - 3000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_sums_within_week_and_exercise() {
        let rows = vec![
            row(1, "Bench", 80.0, &[8]),
            row(1, "Bench", 82.5, &[8]),
            row(2, "Bench", 85.0, &[8]),
            row(1, "Row", 60.0, &[12]),
        ];
        let series = aggregate(Metric::Load, &rows);
        let values: Vec<_> = series
            .points
            .iter()
            .map(|p| (p.week_number, p.exercise.as_str(), p.value))
            .collect();
        assert_eq!(
            values,
            vec![(1, "Bench", 162.5), (1, "Row", 60.0), (2, "Bench", 85.0)]
        );
    }

    #[test]
    fn test_reps_keep_every_set_with_position() {
        let rows = vec![row(1, "Bench", 80.0, &[8, 8, 6]), row(1, "Bench", 80.0, &[9])];
        let series = aggregate(Metric::Reps, &rows);
        let values: Vec<_> = series
            .points
            .iter()
            .map(|p| (p.set_position, p.value))
            .collect();
        assert_eq!(
            values,
            vec![(Some(1), 8.0), (Some(1), 9.0), (Some(2), 8.0), (Some(3), 6.0)]
        );
    }

    #[test]
    fn test_empty_rows_give_empty_series() {
        let series = aggregate(Metric::Load, &[]);
        assert!(series.is_empty());
        assert_eq!(series.metric, Metric::Load);
    }
}
