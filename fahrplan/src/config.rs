//! Conference-level configuration loading
//!
//! Configuration arrives as JSON, is deserialized into [`ScheduleConfig`]
//! and validated into a [`Conference`] before any row processing begins.

use std::fmt::Display;
use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::datetime::{parse_date, parse_duration, ParseError};
use crate::schedule::conference::{Conference, ConfigError};

/// Error while loading or validating configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ConfigLoadError {
    /// IO error while reading the config source
    Io(String),
    /// Malformed JSON or missing keys
    Json(String),
    /// A temporal config field did not match its expected shape
    Parse(ParseError),
    /// The conference-level values are structurally invalid
    Conference(ConfigError),
}

impl Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error while reading config: {e}"),
            Self::Json(e) => write!(f, "Invalid config JSON: {e}"),
            Self::Parse(e) => write!(f, "Invalid temporal config value: {e}"),
            Self::Conference(e) => write!(f, "Invalid conference config: {e}"),
        }
    }
}

impl std::error::Error for ConfigLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Conference(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigLoadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<serde_json::Error> for ConfigLoadError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}

impl From<ParseError> for ConfigLoadError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<ConfigError> for ConfigLoadError {
    fn from(e: ConfigError) -> Self {
        Self::Conference(e)
    }
}

/// Conference section of the configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConferenceConfig {
    /// Conference title
    pub title: String,
    /// Short acronym, used in generated slugs
    pub acronym: String,
    /// Number of conference days
    pub day_count: u32,
    /// First day, `YYYY-MM-DD`
    pub start: String,
    /// Last day (inclusive), `YYYY-MM-DD`
    pub end: String,
    /// Grid granularity, `HH:MM`
    pub time_slot_duration: String,
    /// Default recording license for every event
    pub license: String,
}

impl ConferenceConfig {
    /// Parse the temporal fields and build a validated [`Conference`]
    pub fn conference(&self) -> Result<Conference, ConfigLoadError> {
        Ok(Conference::new(
            self.title.clone(),
            self.acronym.clone(),
            self.day_count,
            parse_date(&self.start)?,
            parse_date(&self.end)?,
            parse_duration(&self.time_slot_duration)?,
        )?)
    }
}

/// Top-level configuration of one conversion run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// Conference metadata
    pub conference: ConferenceConfig,
    /// Path of the input CSV
    pub source: String,
    /// Path of the output XML (`.gz` suffix enables compression)
    pub output: String,
}

impl ScheduleConfig {
    /// Load configuration from a JSON reader
    pub fn from_json_reader(reader: impl Read) -> Result<Self, ConfigLoadError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Load configuration from a JSON file path
    pub fn from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let file = std::fs::File::open(path)?;
        Self::from_json_reader(std::io::BufReader::new(file))
    }
}
