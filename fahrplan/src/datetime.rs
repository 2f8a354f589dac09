//! Parsing of the textual date/time/duration shapes used by schedule sources
//!
//! All functions are pure and are called once per field per row; they return
//! a [`ParseError`] carrying the offending text instead of logging anything.

use std::fmt::Display;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Error for a temporal field that does not match its expected textual shape
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ParseError {
    /// Not a `YYYY-MM-DD` calendar date
    InvalidDate(String),
    /// Not a `HH:MM` time of day
    InvalidTime(String),
    /// Not a combined `YYYY-MM-DDTHH:MM:SS` date + time
    InvalidDateTime(String),
    /// Not a non-negative `HH:MM` duration
    InvalidDuration(String),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(t) => write!(f, "Invalid date (expected YYYY-MM-DD): '{t}'"),
            Self::InvalidTime(t) => write!(f, "Invalid time (expected HH:MM): '{t}'"),
            Self::InvalidDateTime(t) => {
                write!(f, "Invalid datetime (expected YYYY-MM-DDTHH:MM:SS): '{t}'")
            }
            Self::InvalidDuration(t) => write!(f, "Invalid duration (expected HH:MM): '{t}'"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_date(text: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|_| ParseError::InvalidDate(text.to_string()))
}

/// Parse a `HH:MM` time of day
pub fn parse_time(text: &str) -> Result<NaiveTime, ParseError> {
    NaiveTime::parse_from_str(text.trim(), "%H:%M")
        .map_err(|_| ParseError::InvalidTime(text.to_string()))
}

/// Parse a combined `YYYY-MM-DDTHH:MM:SS` datetime
///
/// This is the exact shape produced by joining a row's date and start-time
/// fields with `T` and appending a literal `:00` seconds suffix.
pub fn parse_datetime(text: &str) -> Result<NaiveDateTime, ParseError> {
    NaiveDateTime::parse_from_str(text.trim(), "%Y-%m-%dT%H:%M:%S")
        .map_err(|_| ParseError::InvalidDateTime(text.to_string()))
}

/// Parse a non-negative `HH:MM` duration
///
/// `"00:00"` is a valid zero-length span here; whether zero is acceptable is
/// decided by the consumer (e.g., [`Event`](crate::Event) construction
/// rejects it, [`Conference`](crate::Conference) slot durations reject it).
/// The hour component is not capped at 23, since durations are spans and not
/// clock times.
pub fn parse_duration(text: &str) -> Result<Duration, ParseError> {
    let err = || ParseError::InvalidDuration(text.to_string());
    let (h, m) = text.trim().split_once(':').ok_or_else(err)?;
    let hours: u32 = h.parse().map_err(|_| err())?;
    let minutes: u32 = m.parse().map_err(|_| err())?;
    if minutes >= 60 {
        return Err(err());
    }
    Ok(Duration::minutes(i64::from(hours) * 60 + i64::from(minutes)))
}

/// Format a duration back into the `HH:MM` text form used by the XML output
pub fn format_duration(duration: &Duration) -> String {
    let total_minutes = duration.num_minutes();
    format!("{:02}:{:02}", total_minutes / 60, total_minutes % 60)
}
