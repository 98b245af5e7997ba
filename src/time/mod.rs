//! Time module for close-approach timestamps
//!
//! JPL's close-approach data reports approach times either as a calendar
//! string such as `2020-Jan-01 12:30` or as a Julian date. This module
//! normalizes both into `chrono::DateTime<Utc>` and renders timestamps back
//! out at the dataset's precision (minutes).

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::{NeoError, Result};

/// Calendar format used by the CAD dataset (`2020-Jan-01 12:30`)
pub const CAD_DATETIME_FORMAT: &str = "%Y-%b-%d %H:%M";

/// Format used for rendering and export (`2020-01-01 12:30`)
pub const OUTPUT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Formats tried in order when parsing calendar text
const ACCEPTED_FORMATS: [&str; 4] = [
    CAD_DATETIME_FORMAT,
    "%Y-%b-%d %H:%M:%S",
    OUTPUT_DATETIME_FORMAT,
    "%Y-%m-%d %H:%M:%S",
];

/// Julian date of the Unix epoch (1970-01-01T00:00:00 UTC)
pub const UNIX_EPOCH_JD: f64 = 2440587.5;

/// Milliseconds per day
const DAY_MS: f64 = 86_400_000.0;

/// Raw approach time as handed over by a loader
#[derive(Debug, Clone, PartialEq)]
pub enum ApproachTime {
    /// Calendar text in CAD or output format
    Calendar(String),
    /// Julian date (the CAD `jd` column)
    JulianDate(f64),
    /// An already-normalized timestamp
    DateTime(DateTime<Utc>),
}

impl From<&str> for ApproachTime {
    fn from(value: &str) -> Self {
        ApproachTime::Calendar(value.to_string())
    }
}

impl From<String> for ApproachTime {
    fn from(value: String) -> Self {
        ApproachTime::Calendar(value)
    }
}

impl From<f64> for ApproachTime {
    fn from(value: f64) -> Self {
        ApproachTime::JulianDate(value)
    }
}

impl From<DateTime<Utc>> for ApproachTime {
    fn from(value: DateTime<Utc>) -> Self {
        ApproachTime::DateTime(value)
    }
}

impl From<NaiveDateTime> for ApproachTime {
    /// Naive timestamps are taken to be UTC
    fn from(value: NaiveDateTime) -> Self {
        ApproachTime::DateTime(value.and_utc())
    }
}

/// Parse calendar text in any of the accepted formats
///
/// The CAD format (`2020-Jan-01 12:30`) is tried first, then the same with
/// seconds, then the numeric output format so exported values can be read
/// back. The error carries the failure of the last format tried.
pub fn parse_calendar_date(text: &str) -> Result<DateTime<Utc>> {
    let trimmed = text.trim();

    ACCEPTED_FORMATS[1..]
        .iter()
        .fold(
            NaiveDateTime::parse_from_str(trimmed, ACCEPTED_FORMATS[0]),
            |parsed, format| parsed.or_else(|_| NaiveDateTime::parse_from_str(trimmed, format)),
        )
        .map(|naive| naive.and_utc())
        .map_err(|source| NeoError::TimeParse {
            input: text.to_string(),
            source,
        })
}

/// Convert a Julian date to a UTC timestamp, rounded to the millisecond
pub fn julian_date_to_datetime(jd: f64) -> Result<DateTime<Utc>> {
    if !jd.is_finite() {
        return Err(NeoError::JulianDateOutOfRange(jd));
    }

    let millis = ((jd - UNIX_EPOCH_JD) * DAY_MS).round();
    DateTime::from_timestamp_millis(millis as i64).ok_or(NeoError::JulianDateOutOfRange(jd))
}

/// Normalize any raw approach time into a UTC timestamp
pub fn parse_approach_time(raw: ApproachTime) -> Result<DateTime<Utc>> {
    match raw {
        ApproachTime::Calendar(text) => parse_calendar_date(&text),
        ApproachTime::JulianDate(jd) => julian_date_to_datetime(jd),
        ApproachTime::DateTime(dt) => Ok(dt),
    }
}

/// Render a timestamp without seconds, matching the dataset's precision
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format(OUTPUT_DATETIME_FORMAT).to_string()
}
