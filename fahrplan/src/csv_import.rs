//! CSV import of schedule rows
//!
//! Each row describes one talk. Rows are first converted into the typed
//! [`ScheduleRow`] record (failing fast on missing or malformed fields, with
//! the offending row number), then turned into an [`Event`] and inserted
//! into the [`Schedule`]. The first bad row aborts the whole import; there
//! is no per-row recovery.

use std::collections::HashMap;
use std::fmt::Display;
use std::io::Read;

use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::datetime::{parse_datetime, parse_duration, parse_time, ParseError};
use crate::schedule::conference::Conference;
use crate::schedule::event::{Event, EventData, EventPerson};
use crate::schedule::schedule_struct::{Schedule, ScheduleError};
use crate::slug::SlugGenerator;

/// Error type for schedule CSV parsing
///
/// Row numbers are 1-based counting the header, so the first data row is 2.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum CsvImportError {
    /// CSV parsing error
    CsvError(String),
    /// Missing required column
    MissingColumn(String),
    /// A required field is empty
    MissingField {
        /// Row number where the error occurred
        row: usize,
        /// Name of the empty field
        field: String,
    },
    /// A field did not match its expected textual shape
    Parse {
        /// Row number where the error occurred
        row: usize,
        /// Error message
        message: String,
    },
    /// Event construction rejected the row
    Event {
        /// Row number where the error occurred
        row: usize,
        /// Error message
        message: String,
    },
    /// The schedule rejected the event
    Schedule {
        /// Row number where the error occurred
        row: usize,
        /// The underlying schedule error
        source: ScheduleError,
    },
}

impl Display for CsvImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CsvError(e) => write!(f, "CSV error: {e}"),
            Self::MissingColumn(col) => write!(f, "Missing required column: {col}"),
            Self::MissingField { row, field } => {
                write!(f, "Missing field '{field}' at row {row}")
            }
            Self::Parse { row, message } => write!(f, "Parse error at row {row}: {message}"),
            Self::Event { row, message } => write!(f, "Invalid event at row {row}: {message}"),
            Self::Schedule { row, source } => write!(f, "Schedule error at row {row}: {source}"),
        }
    }
}

impl std::error::Error for CsvImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Schedule { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<csv::Error> for CsvImportError {
    fn from(e: csv::Error) -> Self {
        Self::CsvError(e.to_string())
    }
}

/// Options for schedule CSV import
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CsvImportOptions {
    /// Recording license applied to every imported event
    pub default_recording_license: String,
    /// Verbosely log every added event to stderr
    pub verbose: bool,
}

/// One talk row, parsed and validated
///
/// Temporal fields are already normalized here, so the subsequent
/// [`Event`] construction can no longer fail on malformed text.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ScheduleRow {
    uid: String,
    date: NaiveDateTime,
    start: NaiveTime,
    duration: Duration,
    title: String,
    description: String,
    abstract_text: String,
    language: String,
    speaker_id: String,
    speaker: String,
    file_url: Option<String>,
    room: String,
    day: u32,
}

/// Columns that must be present in the header
const REQUIRED_COLUMNS: [&str; 10] = [
    "ID",
    "Date",
    "Start",
    "Duration",
    "Title",
    "Language",
    "SpeakerID",
    "Speaker",
    "Room",
    "Day",
];

/// Map trimmed header names to their column index
fn classify_columns(headers: &csv::StringRecord) -> Result<HashMap<String, usize>, CsvImportError> {
    let columns: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim().to_string(), i))
        .collect();
    for required in REQUIRED_COLUMNS {
        if !columns.contains_key(required) {
            return Err(CsvImportError::MissingColumn(required.to_string()));
        }
    }
    Ok(columns)
}

fn required_field<'a>(
    record: &'a csv::StringRecord,
    columns: &HashMap<String, usize>,
    name: &str,
    row: usize,
) -> Result<&'a str, CsvImportError> {
    let value = record
        .get(columns[name])
        .unwrap_or("")
        .trim();
    if value.is_empty() {
        return Err(CsvImportError::MissingField {
            row,
            field: name.to_string(),
        });
    }
    Ok(value)
}

fn optional_field(
    record: &csv::StringRecord,
    columns: &HashMap<String, usize>,
    name: &str,
) -> String {
    columns
        .get(name)
        .and_then(|i| record.get(*i))
        .unwrap_or("")
        .trim()
        .to_string()
}

fn parse_row(
    record: &csv::StringRecord,
    columns: &HashMap<String, usize>,
    row: usize,
) -> Result<ScheduleRow, CsvImportError> {
    let wrap = |e: ParseError| CsvImportError::Parse {
        row,
        message: e.to_string(),
    };
    let date_text = required_field(record, columns, "Date", row)?;
    let start_text = required_field(record, columns, "Start", row)?;
    let day_text = required_field(record, columns, "Day", row)?;
    let day: u32 = day_text.parse().map_err(|_| CsvImportError::Parse {
        row,
        message: format!("Invalid day index: '{day_text}'"),
    })?;
    let file_url = optional_field(record, columns, "File URL");
    Ok(ScheduleRow {
        uid: required_field(record, columns, "ID", row)?.to_string(),
        // The source splits date and start time; the target format wants both
        // the combined instant and the time-of-day component
        date: parse_datetime(&format!("{date_text}T{start_text}:00")).map_err(wrap)?,
        start: parse_time(start_text).map_err(wrap)?,
        duration: parse_duration(required_field(record, columns, "Duration", row)?)
            .map_err(wrap)?,
        title: required_field(record, columns, "Title", row)?.to_string(),
        description: optional_field(record, columns, "Description"),
        abstract_text: optional_field(record, columns, "Abstract"),
        language: required_field(record, columns, "Language", row)?.to_string(),
        speaker_id: required_field(record, columns, "SpeakerID", row)?.to_string(),
        speaker: required_field(record, columns, "Speaker", row)?.to_string(),
        file_url: (!file_url.is_empty()).then_some(file_url),
        room: required_field(record, columns, "Room", row)?.to_string(),
        day,
    })
}

impl ScheduleRow {
    fn into_event_data(self, recording_license: String) -> EventData {
        EventData {
            uid: self.uid,
            date: self.date,
            start: self.start,
            duration: self.duration,
            title: self.title,
            description: self.description,
            abstract_text: self.abstract_text,
            language: self.language,
            persons: vec![EventPerson {
                id: self.speaker_id,
                name: self.speaker,
            }],
            download_url: self.file_url,
            recording_license,
        }
    }
}

/// Import a schedule from a CSV reader
///
/// Rooms are registered with the schedule as rows reference them, so the
/// caller only supplies the conference, a [`SlugGenerator`] and options.
pub fn import_schedule_csv(
    reader: impl Read,
    conference: Conference,
    slugs: &mut dyn SlugGenerator,
    options: &CsvImportOptions,
) -> Result<Schedule, CsvImportError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers()?.clone();
    let columns = classify_columns(&headers)?;

    let mut schedule = Schedule::new(conference);
    for (row_idx, result) in rdr.records().enumerate() {
        let record = result?;
        let row_num = row_idx + 2;

        let row = parse_row(&record, &columns, row_num)?;
        let (day, room) = (row.day, row.room.clone());
        let data = row.into_event_data(options.default_recording_license.clone());
        let event = Event::new(data, slugs).map_err(|e| CsvImportError::Event {
            row: row_num,
            message: e.to_string(),
        })?;
        if options.verbose {
            eprintln!(
                "Adding event '{}' ({}) to day {day}, room '{room}'",
                event.uid(),
                event.slug()
            );
        }
        schedule.add_room(&room);
        schedule
            .add_event(day, &room, event)
            .map_err(|source| CsvImportError::Schedule {
                row: row_num,
                source,
            })?;
    }
    Ok(schedule)
}

/// Import a schedule from a CSV file path
pub fn import_schedule_csv_from_path<P: AsRef<std::path::Path>>(
    path: P,
    conference: Conference,
    slugs: &mut dyn SlugGenerator,
    options: &CsvImportOptions,
) -> Result<Schedule, CsvImportError> {
    let file = std::fs::File::open(path).map_err(|e| CsvImportError::CsvError(e.to_string()))?;
    import_schedule_csv(std::io::BufReader::new(file), conference, slugs, options)
}
