//! Conference metadata: title, acronym, date span and slot granularity

use std::fmt::Display;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Error for structurally invalid conference-level configuration
///
/// Surfaced by [`Conference::new`] before any row processing begins.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ConfigError {
    /// The conference start date lies after its end date
    StartAfterEnd {
        /// Configured start date
        start: NaiveDate,
        /// Configured end date
        end: NaiveDate,
    },
    /// `day_count` is zero or does not equal the inclusive start..=end span
    InvalidDayCount {
        /// Configured day count
        day_count: u32,
        /// Inclusive number of days between start and end
        span_days: u32,
    },
    /// The time slot duration is zero or negative
    NonPositiveSlotDuration,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StartAfterEnd { start, end } => {
                write!(f, "Conference start {start} lies after end {end}")
            }
            Self::InvalidDayCount {
                day_count,
                span_days,
            } => write!(
                f,
                "Conference day_count {day_count} does not match the {span_days} day(s) between start and end"
            ),
            Self::NonPositiveSlotDuration => {
                write!(f, "Conference time_slot_duration must be positive")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

///
/// Global metadata of one conference
///
/// Constructed once from configuration before any events are added and
/// immutable thereafter. `day_count` is validated against the inclusive
/// start..=end span, so consumers can treat it as authoritative.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conference {
    title: String,
    acronym: String,
    day_count: u32,
    start: NaiveDate,
    end: NaiveDate,
    time_slot_duration: Duration,
}

impl Conference {
    /// Create a new [`Conference`], validating the date span, day count and slot duration
    pub fn new(
        title: String,
        acronym: String,
        day_count: u32,
        start: NaiveDate,
        end: NaiveDate,
        time_slot_duration: Duration,
    ) -> Result<Self, ConfigError> {
        if start > end {
            return Err(ConfigError::StartAfterEnd { start, end });
        }
        let span_days = (end - start).num_days() as u32 + 1;
        if day_count == 0 || day_count != span_days {
            return Err(ConfigError::InvalidDayCount {
                day_count,
                span_days,
            });
        }
        if time_slot_duration <= Duration::zero() {
            return Err(ConfigError::NonPositiveSlotDuration);
        }
        Ok(Self {
            title,
            acronym,
            day_count,
            start,
            end,
            time_slot_duration,
        })
    }

    /// Conference title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Short acronym, also used in generated slugs
    pub fn acronym(&self) -> &str {
        &self.acronym
    }

    /// Number of conference days (equals the inclusive start..=end span)
    pub fn day_count(&self) -> u32 {
        self.day_count
    }

    /// First conference day
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last conference day (inclusive)
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Grid granularity used for schedule display
    pub fn time_slot_duration(&self) -> Duration {
        self.time_slot_duration
    }

    /// Calendar date of the 1-based `day` index, or `None` if out of range
    pub fn date_of_day(&self, day: u32) -> Option<NaiveDate> {
        if day == 0 || day > self.day_count {
            return None;
        }
        Some(self.start + Duration::days(i64::from(day) - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datetime::{parse_date, parse_duration};

    fn base() -> (NaiveDate, NaiveDate) {
        (
            parse_date("2024-05-01").unwrap(),
            parse_date("2024-05-03").unwrap(),
        )
    }

    #[test]
    fn test_valid_conference() {
        let (start, end) = base();
        let conf = Conference::new(
            "Example Congress".to_string(),
            "exc".to_string(),
            3,
            start,
            end,
            parse_duration("00:10").unwrap(),
        )
        .unwrap();
        assert_eq!(conf.day_count(), 3);
        assert_eq!(conf.acronym(), "exc");
    }

    #[test]
    fn test_start_after_end() {
        let (start, end) = base();
        let res = Conference::new(
            "t".to_string(),
            "t".to_string(),
            3,
            end,
            start,
            parse_duration("00:10").unwrap(),
        );
        assert!(matches!(res, Err(ConfigError::StartAfterEnd { .. })));
    }

    #[test]
    fn test_day_count_mismatch() {
        let (start, end) = base();
        let res = Conference::new(
            "t".to_string(),
            "t".to_string(),
            2,
            start,
            end,
            parse_duration("00:10").unwrap(),
        );
        assert!(matches!(
            res,
            Err(ConfigError::InvalidDayCount {
                day_count: 2,
                span_days: 3
            })
        ));
    }

    #[test]
    fn test_non_positive_slot_duration() {
        let (start, end) = base();
        let res = Conference::new(
            "t".to_string(),
            "t".to_string(),
            3,
            start,
            end,
            parse_duration("00:00").unwrap(),
        );
        assert!(matches!(res, Err(ConfigError::NonPositiveSlotDuration)));
    }

    #[test]
    fn test_date_of_day() {
        let (start, end) = base();
        let conf = Conference::new(
            "t".to_string(),
            "t".to_string(),
            3,
            start,
            end,
            parse_duration("00:10").unwrap(),
        )
        .unwrap();
        assert_eq!(conf.date_of_day(1), Some(start));
        assert_eq!(conf.date_of_day(3), Some(end));
        assert_eq!(conf.date_of_day(0), None);
        assert_eq!(conf.date_of_day(4), None);
    }
}
