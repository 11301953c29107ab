// ABOUTME: Decoding of browser form posts with repeated and indexed keys
// ABOUTME: Turns program and log submissions into typed inputs, rejecting malformed numbers

//! Form decoding
//!
//! The program and log forms repeat keys (`training_days[]`, `exercise_name[]`)
//! and index rep inputs per exercise row (`reps[2][]`), which typed `Form<T>`
//! extraction cannot express. Bodies are decoded into ordered key/value pairs
//! and read positionally.

use crate::errors::{AppError, AppResult};
use crate::models::{LogBatch, LogEntry, NewProgram, RepScheme, Weekday, WeekSplit};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Ordered key/value pairs of a url-encoded body
#[derive(Debug, Clone, Default)]
pub struct FormFields(Vec<(String, String)>);

impl FormFields {
    /// Decode an `application/x-www-form-urlencoded` body
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` if the body is not valid url encoding
    pub fn from_bytes(body: &[u8]) -> AppResult<Self> {
        serde_urlencoded::from_bytes::<Vec<(String, String)>>(body)
            .map(Self)
            .map_err(|e| AppError::invalid_format("form body", &e.to_string()))
    }

    /// First value for `name`
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Every value for `name`, in submission order
    #[must_use]
    pub fn all(&self, name: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    /// First non-blank value for `name`
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` when absent or blank
    pub fn required(&self, name: &str) -> AppResult<&str> {
        self.first(name)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AppError::missing_field(name))
    }

    /// Parse a required field
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` or `InvalidFormat`
    pub fn required_parsed<T: FromStr>(&self, name: &str) -> AppResult<T> {
        let raw = self.required(name)?;
        raw.parse()
            .map_err(|_| AppError::invalid_format(name, raw))
    }

    /// Values of `prefix[<index>][]` keys grouped by index
    #[must_use]
    pub fn indexed(&self, prefix: &str) -> BTreeMap<usize, Vec<&str>> {
        let mut groups: BTreeMap<usize, Vec<&str>> = BTreeMap::new();
        for (key, value) in &self.0 {
            if let Some(index) = parse_indexed_key(key, prefix) {
                groups.entry(index).or_default().push(value.as_str());
            }
        }
        groups
    }
}

/// `reps[3][]` with prefix `reps` gives `Some(3)`
fn parse_indexed_key(key: &str, prefix: &str) -> Option<usize> {
    key.strip_prefix(prefix)?
        .strip_prefix('[')?
        .strip_suffix("][]")?
        .parse()
        .ok()
}

/// Blank means "not provided"; anything else must parse
fn optional_number<T: FromStr>(field: &str, raw: Option<&str>) -> AppResult<Option<T>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| AppError::invalid_format(field, value)),
    }
}

/// Like [`optional_number`], but `NaN` and infinities are malformed loads
fn optional_load(raw: Option<&str>) -> AppResult<Option<f64>> {
    match optional_number::<f64>("load", raw)? {
        Some(load) if !load.is_finite() => Err(AppError::invalid_format(
            "load",
            raw.map_or("", str::trim),
        )),
        load => Ok(load),
    }
}

fn rep_scheme(values: &[&str]) -> AppResult<RepScheme> {
    values
        .iter()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(|value| {
            value
                .parse::<u32>()
                .map_err(|_| AppError::invalid_format("reps", value))
        })
        .collect::<AppResult<Vec<_>>>()
        .map(RepScheme::new)
}

/// Decode the program creation form
///
/// # Errors
///
/// Returns `MissingRequiredField` or `InvalidFormat` for bad fields
pub fn parse_new_program(fields: &FormFields) -> AppResult<NewProgram> {
    let name = fields.required("program_name")?.to_owned();

    let raw_date = fields.required("start_date")?;
    let start_date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d")
        .map_err(|_| AppError::invalid_format("start_date", raw_date))?;

    let total_weeks = fields.required_parsed("weeks")?;

    let training_days = fields
        .all("training_days[]")
        .into_iter()
        .map(str::parse::<Weekday>)
        .collect::<AppResult<Vec<_>>>()
        .map(WeekSplit::new)?;

    Ok(NewProgram {
        name,
        start_date,
        total_weeks,
        training_days,
    })
}

/// Decode the log submission form
///
/// Exercise rows are matched by position across `exercise_name[]`, `load[]`,
/// `sets[]`, and `rir[]`; row `i` takes its reps from `reps[i][]`. Blank rep
/// inputs are ignored. `user_id` falls back to `session_user` when the form
/// omits it.
///
/// # Errors
///
/// Returns `MissingRequiredField` or `InvalidFormat` for bad fields
pub fn parse_log_batch(fields: &FormFields, session_user: Option<i64>) -> AppResult<LogBatch> {
    let user_id = match fields.first("user_id").map(str::trim) {
        Some(raw) if !raw.is_empty() => raw
            .parse()
            .map_err(|_| AppError::invalid_format("user_id", raw))?,
        _ => session_user.ok_or_else(|| AppError::missing_field("user_id"))?,
    };

    let names = fields.all("exercise_name[]");
    let loads = fields.all("load[]");
    let sets = fields.all("sets[]");
    let rirs = fields.all("rir[]");
    let reps = fields.indexed("reps");

    let entries = names
        .iter()
        .enumerate()
        .map(|(row, name)| {
            Ok(LogEntry {
                exercise_name: (*name).to_owned(),
                load: optional_load(loads.get(row).copied())?,
                sets: optional_number("sets", sets.get(row).copied())?,
                rir: optional_number("rir", rirs.get(row).copied())?,
                reps: rep_scheme(reps.get(&row).map_or(&[][..], Vec::as_slice))?,
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    let session_name = fields
        .first("session_name")
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned);

    Ok(LogBatch {
        user_id,
        program_id: fields.required_parsed("program_id")?,
        week_number: fields.required_parsed("week_number")?,
        session_day: fields.required("session_day")?.parse()?,
        session_name,
        entries,
    })
}
