// ABOUTME: Schedule value types: weekday indices, week splits, and per-set rep schemes
// ABOUTME: Owns the comma-joined text encoding stored in training_weeks and logs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::schedule::{FIRST_WEEKDAY, LAST_WEEKDAY, LIST_SEPARATOR};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Day of the week as a 1-based index (1 = Monday .. 7 = Sunday)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Weekday(u8);

impl Weekday {
    /// Build a weekday from its 1-based index
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` when the index is outside 1..=7
    pub fn new(index: i64) -> AppResult<Self> {
        u8::try_from(index)
            .ok()
            .filter(|day| (FIRST_WEEKDAY..=LAST_WEEKDAY).contains(day))
            .map(Self)
            .ok_or_else(|| AppError::invalid_format("weekday", &index.to_string()))
    }

    /// 1-based index
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// English day name
    #[must_use]
    pub const fn name(self) -> &'static str {
        WEEKDAY_NAMES[(self.0 - FIRST_WEEKDAY) as usize]
    }
}

impl TryFrom<i64> for Weekday {
    type Error = AppError;

    fn try_from(value: i64) -> AppResult<Self> {
        Self::new(value)
    }
}

impl From<Weekday> for i64 {
    fn from(day: Weekday) -> Self {
        Self::from(day.0)
    }
}

impl FromStr for Weekday {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        let trimmed = s.trim();
        trimmed
            .parse::<i64>()
            .map_err(|_| AppError::invalid_format("weekday", trimmed))
            .and_then(Self::new)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The set of weekdays a training week trains on, stored as `"1,3,5"`
///
/// Days are kept sorted and unique regardless of submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekSplit(BTreeSet<Weekday>);

impl WeekSplit {
    /// Build a split from any collection of weekdays
    pub fn new(days: impl IntoIterator<Item = Weekday>) -> Self {
        Self(days.into_iter().collect())
    }

    /// Training days in calendar order
    pub fn days(&self) -> impl Iterator<Item = Weekday> + '_ {
        self.0.iter().copied()
    }

    /// Whether the split trains on `day`
    #[must_use]
    pub fn contains(&self, day: Weekday) -> bool {
        self.0.contains(&day)
    }

    /// Number of training days
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for a rest-only week
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for WeekSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(&LIST_SEPARATOR.to_string());
        f.write_str(&joined)
    }
}

impl FromStr for WeekSplit {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        s.split(LIST_SEPARATOR)
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::parse::<Weekday>)
            .collect::<AppResult<BTreeSet<_>>>()
            .map(Self)
    }
}

impl TryFrom<String> for WeekSplit {
    type Error = AppError;

    fn try_from(value: String) -> AppResult<Self> {
        value.parse()
    }
}

/// Rep counts for each set of one exercise entry, in set order, stored as `"10,10,8"`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepScheme(Vec<u32>);

impl RepScheme {
    /// Build from per-set rep counts
    #[must_use]
    pub const fn new(reps: Vec<u32>) -> Self {
        Self(reps)
    }

    /// Per-set rep counts in order
    #[must_use]
    pub fn per_set(&self) -> &[u32] {
        &self.0
    }

    /// Sum of reps across all sets
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.iter().map(|&reps| u64::from(reps)).sum()
    }

    /// Number of recorded sets
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no set was recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RepScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(&LIST_SEPARATOR.to_string());
        f.write_str(&joined)
    }
}

impl FromStr for RepScheme {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        s.split(LIST_SEPARATOR)
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<u32>()
                    .map_err(|_| AppError::invalid_format("reps", part))
            })
            .collect::<AppResult<Vec<_>>>()
            .map(Self)
    }
}

impl TryFrom<String> for RepScheme {
    type Error = AppError;

    fn try_from(value: String) -> AppResult<Self> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_bounds() {
        assert!(Weekday::new(0).is_err());
        assert!(Weekday::new(8).is_err());
        assert_eq!(Weekday::new(1).unwrap().name(), "Monday");
        assert_eq!(Weekday::new(7).unwrap().name(), "Sunday");
    }

    #[test]
    fn test_week_split_sorted_and_unique() {
        let split: WeekSplit = "5, 1,3,1".parse().unwrap();
        assert_eq!(split.to_string(), "1,3,5");
        assert_eq!(split.len(), 3);
        assert!(split.contains(Weekday::new(3).unwrap()));
        assert!(!split.contains(Weekday::new(2).unwrap()));
    }

    #[test]
    fn test_empty_week_split() {
        let split: WeekSplit = "".parse().unwrap();
        assert!(split.is_empty());
        assert_eq!(split.to_string(), "");
    }

    #[test]
    fn test_week_split_rejects_out_of_range_day() {
        assert!("1,9".parse::<WeekSplit>().is_err());
        assert!("mon".parse::<WeekSplit>().is_err());
    }

    #[test]
    fn test_rep_scheme_keeps_set_order() {
        let reps: RepScheme = "10,10,8".parse().unwrap();
        assert_eq!(reps.per_set(), &[10, 10, 8]);
        assert_eq!(reps.total(), 28);
        assert_eq!(reps.to_string(), "10,10,8");
    }

    #[test]
    fn test_rep_scheme_rejects_garbage() {
        assert!("8,x".parse::<RepScheme>().is_err());
        assert!("-1".parse::<RepScheme>().is_err());
    }

    #[test]
    fn test_weekday_serializes_as_number() {
        let json = serde_json::to_string(&WeekSplit::new([
            Weekday::new(3).unwrap(),
            Weekday::new(1).unwrap(),
        ]))
        .unwrap();
        assert_eq!(json, "[1,3]");
    }
}
