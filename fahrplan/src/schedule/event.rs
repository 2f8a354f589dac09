//! Event struct and sub-structs

use std::fmt::Display;

use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::slug::SlugGenerator;

/// One person associated with an event, keyed by the source's person id
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventPerson {
    /// Opaque person id from the source row
    pub id: String,
    /// Display name
    pub name: String,
}

/// Error encountered while constructing an [`Event`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum EventError {
    /// The event duration is zero or negative
    NonPositiveDuration {
        /// Uid of the offending event
        uid: String,
    },
    /// The event has no associated persons
    NoPersons {
        /// Uid of the offending event
        uid: String,
    },
}

impl Display for EventError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveDuration { uid } => {
                write!(f, "Event '{uid}' has a zero or negative duration")
            }
            Self::NoPersons { uid } => write!(f, "Event '{uid}' has no persons"),
        }
    }
}

impl std::error::Error for EventError {}

///
/// The raw fields of one scheduled talk, before slug assignment
///
/// This is the typed intermediate record built from a source row; an
/// [`Event`] is constructed from it via [`Event::new`], which also derives
/// the slug through the caller's [`SlugGenerator`].
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventData {
    /// Opaque unique key from the source row
    pub uid: String,
    /// Absolute start instant
    pub date: NaiveDateTime,
    /// Time-of-day component of the start instant
    ///
    /// Redundant with `date`, but the Fahrplan format carries both.
    pub start: NaiveTime,
    /// Length of the talk
    pub duration: Duration,
    /// Talk title
    pub title: String,
    /// Long description (may be empty)
    pub description: String,
    /// Abstract (may be empty)
    pub abstract_text: String,
    /// Short language code (e.g. `en`)
    pub language: String,
    /// Associated persons, in source order (at least one)
    pub persons: Vec<EventPerson>,
    /// Optional URL of talk material
    pub download_url: Option<String>,
    /// Recording license, defaulted from conference-wide configuration
    pub recording_license: String,
}

///
/// One scheduled talk/session
///
/// Immutable after construction; the slug is derived through a
/// [`SlugGenerator`] rather than freely chosen, so it stays unique within
/// one conversion run.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    data: EventData,
    slug: String,
}

impl Event {
    /// Build an [`Event`] from its raw fields, deriving the slug via `slugs`
    ///
    /// Fails if the duration is not strictly positive or no person is given.
    pub fn new(data: EventData, slugs: &mut dyn SlugGenerator) -> Result<Self, EventError> {
        if data.duration <= Duration::zero() {
            return Err(EventError::NonPositiveDuration {
                uid: data.uid.clone(),
            });
        }
        if data.persons.is_empty() {
            return Err(EventError::NoPersons {
                uid: data.uid.clone(),
            });
        }
        let slug = slugs.generate(&data);
        Ok(Self { data, slug })
    }

    /// Opaque unique key from the source row
    pub fn uid(&self) -> &str {
        &self.data.uid
    }

    /// Absolute start instant
    pub fn date(&self) -> NaiveDateTime {
        self.data.date
    }

    /// Time-of-day component of the start instant
    pub fn start(&self) -> NaiveTime {
        self.data.start
    }

    /// Length of the talk
    pub fn duration(&self) -> Duration {
        self.data.duration
    }

    /// Derived URL-safe identifier, unique within one run
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Talk title
    pub fn title(&self) -> &str {
        &self.data.title
    }

    /// Long description (may be empty)
    pub fn description(&self) -> &str {
        &self.data.description
    }

    /// Abstract (may be empty)
    pub fn abstract_text(&self) -> &str {
        &self.data.abstract_text
    }

    /// Short language code
    pub fn language(&self) -> &str {
        &self.data.language
    }

    /// Associated persons, in source order
    pub fn persons(&self) -> &[EventPerson] {
        &self.data.persons
    }

    /// Optional URL of talk material
    pub fn download_url(&self) -> Option<&str> {
        self.data.download_url.as_deref()
    }

    /// Recording license
    pub fn recording_license(&self) -> &str {
        &self.data.recording_license
    }
}
