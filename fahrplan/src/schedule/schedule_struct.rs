//! The schedule aggregate: rooms, days and their event assignments

use std::collections::{HashMap, HashSet};
use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::schedule::conference::Conference;
use crate::schedule::event::Event;

/// Error for an [`Schedule::add_event`] call violating the aggregate's contract
///
/// All variants are fatal for the current run: silently dropping events
/// would corrupt the output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ScheduleError {
    /// The target room was never added via [`Schedule::add_room`]
    UnknownRoom {
        /// Day index the event was destined for
        day: u32,
        /// The unknown room name
        room: String,
    },
    /// The day index lies outside `1..=day_count`
    DayOutOfRange {
        /// The offending day index
        day: u32,
        /// The conference's day count
        day_count: u32,
    },
    /// An event with the same uid already exists in the schedule
    DuplicateUid {
        /// The duplicated uid
        uid: String,
    },
}

impl Display for ScheduleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownRoom { day, room } => {
                write!(f, "Room '{room}' (day {day}) was not added to the schedule")
            }
            Self::DayOutOfRange { day, day_count } => {
                write!(f, "Day {day} is outside 1..={day_count}")
            }
            Self::DuplicateUid { uid } => write!(f, "Duplicate event uid '{uid}'"),
        }
    }
}

impl std::error::Error for ScheduleError {}

///
/// Aggregate root of one conference schedule
///
/// Owns the room set (insertion-ordered, case-sensitive) and the per-day,
/// per-room event sequences (sorted by start time, stable on ties). Rooms
/// must be added before events are assigned to them; uids are unique across
/// the whole schedule.
///
#[derive(Debug, Clone)]
pub struct Schedule {
    conference: Conference,
    rooms: Vec<String>,
    days: HashMap<u32, HashMap<String, Vec<Event>>>,
    uids: HashSet<String>,
}

impl Schedule {
    /// Create an empty schedule for the given conference
    pub fn new(conference: Conference) -> Self {
        Self {
            conference,
            rooms: Vec::new(),
            days: HashMap::new(),
            uids: HashSet::new(),
        }
    }

    /// The conference this schedule belongs to
    pub fn conference(&self) -> &Conference {
        &self.conference
    }

    /// All known room names, in first-seen order
    pub fn rooms(&self) -> &[String] {
        &self.rooms
    }

    /// Number of events across all days and rooms
    pub fn event_count(&self) -> usize {
        self.uids.len()
    }

    /// Register a room; a no-op if `name` is already present
    pub fn add_room(&mut self, name: &str) {
        if !self.rooms.iter().any(|r| r == name) {
            self.rooms.push(name.to_string());
        }
    }

    /// Insert an event into the given day and room
    ///
    /// The room must have been added beforehand and `day` must lie within
    /// `1..=day_count`; the event's uid must be new to the schedule. The
    /// (day, room) sequence stays sorted by start time, with ties keeping
    /// insertion order.
    pub fn add_event(&mut self, day: u32, room: &str, event: Event) -> Result<(), ScheduleError> {
        if day == 0 || day > self.conference.day_count() {
            return Err(ScheduleError::DayOutOfRange {
                day,
                day_count: self.conference.day_count(),
            });
        }
        if !self.rooms.iter().any(|r| r == room) {
            return Err(ScheduleError::UnknownRoom {
                day,
                room: room.to_string(),
            });
        }
        if !self.uids.insert(event.uid().to_string()) {
            return Err(ScheduleError::DuplicateUid {
                uid: event.uid().to_string(),
            });
        }
        let events = self
            .days
            .entry(day)
            .or_default()
            .entry(room.to_string())
            .or_default();
        // partition_point with <= places ties after their equals: stable
        let index = events.partition_point(|e| e.start() <= event.start());
        events.insert(index, event);
        Ok(())
    }

    /// Events of one day in one room, in start-time order
    ///
    /// `None` if no event was assigned to that (day, room) pair.
    pub fn events_in(&self, day: u32, room: &str) -> Option<&[Event]> {
        self.days
            .get(&day)
            .and_then(|rooms| rooms.get(room))
            .map(Vec::as_slice)
    }
}
