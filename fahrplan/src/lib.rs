#![warn(
    clippy::doc_markdown,
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs
)]

#![allow(clippy::needless_doctest_main)]

#![doc = include_str!("../README.md")]

///
/// Schedule model ([`Conference`], [`Event`] and the aggregate [`Schedule`]) and its XML export
///
pub mod schedule {
    /// [`Conference`] struct and construction-time validation
    pub mod conference;
    /// [`Event`] struct and sub-structs
    pub mod event;
    /// Fahrplan XML export
    pub mod export_xml;
    /// [`Schedule`] struct and mutation API
    pub mod schedule_struct;

    pub use conference::{ConfigError, Conference};
    pub use event::{Event, EventData, EventError, EventPerson};
    pub use schedule_struct::{Schedule, ScheduleError};
}

/// Parsing of dates, times and `HH:MM` durations
pub mod datetime;

/// Slug derivation for events
pub mod slug;

/// CSV import of schedule rows
pub mod csv_import;

/// Conference-level configuration loading
pub mod config;

#[doc(inline)]
pub use schedule::conference::Conference;

#[doc(inline)]
pub use schedule::event::Event;

#[doc(inline)]
pub use schedule::schedule_struct::Schedule;

#[doc(inline)]
pub use schedule::export_xml::export_schedule_xml;

#[doc(inline)]
pub use schedule::export_xml::export_schedule_xml_to_file_path;

#[doc(inline)]
pub use slug::SlugGenerator;

#[doc(inline)]
pub use slug::StandardSlugGenerator;

#[doc(inline)]
pub use slug::UidSlugGenerator;

#[doc(inline)]
pub use csv_import::import_schedule_csv;

#[doc(inline)]
pub use csv_import::import_schedule_csv_from_path;

#[doc(inline)]
pub use csv_import::CsvImportOptions;

#[doc(inline)]
pub use config::ScheduleConfig;
