//! Rendering of a [`Schedule`] into the Fahrplan XML dialect
//!
//! The serializer walks the aggregate in a fixed order (days ascending,
//! rooms in insertion order, events in their stored start-time order), so
//! the same model state always yields byte-identical output. It never
//! re-validates the aggregate; only writer errors propagate.

use std::fs::File;
use std::io::{BufWriter, Write};

use flate2::{write::GzEncoder, Compression};
use quick_xml::events::{BytesDecl, BytesText};
use quick_xml::Writer;

use crate::datetime::format_duration;
use crate::schedule::event::Event;
use crate::schedule::schedule_struct::Schedule;

const OK: Result<(), std::io::Error> = Ok(());

impl Schedule {
    /// Render the schedule into the canonical XML document text
    pub fn to_xml(&self) -> Result<String, quick_xml::Error> {
        let mut out: Vec<u8> = Vec::new();
        export_schedule_xml(&mut out, self)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

///
/// Export a [`Schedule`] as Fahrplan XML to a writer
///
pub fn export_schedule_xml<W: Write>(
    writer: W,
    schedule: &Schedule,
) -> Result<(), quick_xml::Error> {
    let mut writer = Writer::new(writer);
    writer.write_event(quick_xml::events::Event::Decl(BytesDecl::new(
        "1.0",
        Some("UTF-8"),
        None,
    )))?;
    let conference = schedule.conference();
    writer.create_element("schedule").write_inner_content(|w| {
        w.create_element("conference").write_inner_content(|w| {
            write_text_element(w, "title", conference.title())?;
            write_text_element(w, "acronym", conference.acronym())?;
            write_text_element(w, "days", &conference.day_count().to_string())?;
            write_text_element(w, "start", &conference.start().format("%Y-%m-%d").to_string())?;
            write_text_element(w, "end", &conference.end().format("%Y-%m-%d").to_string())?;
            write_text_element(
                w,
                "timeslot_duration",
                &format_duration(&conference.time_slot_duration()),
            )?;
            OK
        })?;
        for day in 1..=conference.day_count() {
            let Some(date) = conference.date_of_day(day) else {
                continue;
            };
            let index = day.to_string();
            let date_text = date.format("%Y-%m-%d").to_string();
            w.create_element("day")
                .with_attributes(vec![
                    ("index", index.as_str()),
                    ("date", date_text.as_str()),
                ])
                .write_inner_content(|w| {
                    // Rooms without events on this day are omitted, but keep
                    // their position in the global insertion order otherwise
                    for room in schedule.rooms() {
                        let events = match schedule.events_in(day, room) {
                            Some(events) if !events.is_empty() => events,
                            _ => continue,
                        };
                        w.create_element("room")
                            .with_attribute(("name", room.as_str()))
                            .write_inner_content(|w| {
                                for event in events {
                                    write_event_element(w, event, room)?;
                                }
                                OK
                            })?;
                    }
                    OK
                })?;
        }
        OK
    })?;
    Ok(())
}

fn write_event_element<W: Write>(
    w: &mut Writer<W>,
    event: &Event,
    room: &str,
) -> Result<(), std::io::Error> {
    w.create_element("event")
        .with_attribute(("id", event.uid()))
        .write_inner_content(|w| {
            write_text_element(
                w,
                "date",
                &event.date().format("%Y-%m-%dT%H:%M:%S").to_string(),
            )?;
            write_text_element(w, "start", &event.start().format("%H:%M").to_string())?;
            write_text_element(w, "duration", &format_duration(&event.duration()))?;
            write_text_element(w, "room", room)?;
            write_text_element(w, "slug", event.slug())?;
            write_text_element(w, "title", event.title())?;
            write_text_element(w, "description", event.description())?;
            write_text_element(w, "abstract", event.abstract_text())?;
            write_text_element(w, "language", event.language())?;
            w.create_element("persons").write_inner_content(|w| {
                for person in event.persons() {
                    w.create_element("person")
                        .with_attribute(("id", person.id.as_str()))
                        .write_text_content(BytesText::new(&person.name))?;
                }
                OK
            })?;
            if let Some(url) = event.download_url() {
                write_text_element(w, "download_url", url)?;
            }
            write_text_element(w, "recording_license", event.recording_license())?;
            OK
        })?;
    Ok(())
}

fn write_text_element<W: Write>(
    w: &mut Writer<W>,
    tag: &str,
    text: &str,
) -> Result<(), std::io::Error> {
    w.create_element(tag).write_text_content(BytesText::new(text))?;
    Ok(())
}

/// Export a [`Schedule`] as Fahrplan XML to a filepath
///
/// Automatically selects gz-compression if the filepath ends with `.gz`
pub fn export_schedule_xml_to_file_path<P: AsRef<std::path::Path>>(
    schedule: &Schedule,
    path: P,
) -> Result<(), quick_xml::Error> {
    let is_gz = path
        .as_ref()
        .as_os_str()
        .to_str()
        .is_some_and(|p| p.ends_with(".gz"));
    let file = File::create(path)?;
    if is_gz {
        let encoder = GzEncoder::new(BufWriter::new(file), Compression::fast());
        return export_schedule_xml(BufWriter::new(encoder), schedule);
    }
    export_schedule_xml(BufWriter::new(file), schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datetime::{parse_date, parse_duration};
    use crate::schedule::conference::Conference;
    use crate::schedule::event::tests::test_event_data;
    use crate::schedule::event::EventData;
    use crate::slug::{SlugGenerator, StandardSlugGenerator};

    fn two_day_schedule() -> (Schedule, StandardSlugGenerator) {
        let conference = Conference::new(
            "Example Congress".to_string(),
            "exc".to_string(),
            2,
            parse_date("2024-05-01").unwrap(),
            parse_date("2024-05-02").unwrap(),
            parse_duration("00:10").unwrap(),
        )
        .unwrap();
        let slugs = StandardSlugGenerator::new(&conference);
        (Schedule::new(conference), slugs)
    }

    fn add(
        schedule: &mut Schedule,
        slugs: &mut impl SlugGenerator,
        day: u32,
        room: &str,
        data: EventData,
    ) {
        schedule.add_room(room);
        schedule
            .add_event(day, room, Event::new(data, slugs).unwrap())
            .unwrap();
    }

    #[test]
    fn test_single_event_document_shape() {
        let (mut schedule, mut slugs) = two_day_schedule();
        add(
            &mut schedule,
            &mut slugs,
            1,
            "Stage",
            test_event_data("1", "Opening", "10:00"),
        );
        let xml = schedule.to_xml().unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert_eq!(xml.matches("<room ").count(), 1);
        assert_eq!(xml.matches("<event ").count(), 1);
        // Both days are emitted, even the empty second one
        assert_eq!(xml.matches("<day ").count(), 2);
        assert!(xml.contains("<room name=\"Stage\">"));
        assert!(xml.contains("<day index=\"1\" date=\"2024-05-01\">"));
        assert!(xml.contains("<day index=\"2\" date=\"2024-05-02\">"));
    }

    #[test]
    fn test_conference_metadata_block() {
        let (schedule, _) = two_day_schedule();
        let xml = schedule.to_xml().unwrap();
        assert!(xml.contains("<title>Example Congress</title>"));
        assert!(xml.contains("<acronym>exc</acronym>"));
        assert!(xml.contains("<days>2</days>"));
        assert!(xml.contains("<start>2024-05-01</start>"));
        assert!(xml.contains("<end>2024-05-02</end>"));
        assert!(xml.contains("<timeslot_duration>00:10</timeslot_duration>"));
    }

    #[test]
    fn test_event_element_fields() {
        let (mut schedule, mut slugs) = two_day_schedule();
        let mut data = test_event_data("9", "Opening", "10:00");
        data.download_url = Some("https://example.org/opening.pdf".to_string());
        add(&mut schedule, &mut slugs, 1, "Stage", data);
        let xml = schedule.to_xml().unwrap();
        assert!(xml.contains("<event id=\"9\">"));
        assert!(xml.contains("<date>2024-05-01T10:00:00</date>"));
        assert!(xml.contains("<start>10:00</start>"));
        assert!(xml.contains("<duration>00:30</duration>"));
        assert!(xml.contains("<room>Stage</room>"));
        assert!(xml.contains("<slug>exc-opening-a-speaker</slug>"));
        assert!(xml.contains("<language>en</language>"));
        assert!(xml.contains("<persons><person id=\"p1\">A. Speaker</person></persons>"));
        assert!(xml.contains("<download_url>https://example.org/opening.pdf</download_url>"));
        assert!(xml.contains("<recording_license>CC BY 4.0</recording_license>"));
    }

    #[test]
    fn test_download_url_omitted_when_absent() {
        let (mut schedule, mut slugs) = two_day_schedule();
        add(
            &mut schedule,
            &mut slugs,
            1,
            "Stage",
            test_event_data("1", "Opening", "10:00"),
        );
        let xml = schedule.to_xml().unwrap();
        assert!(!xml.contains("<download_url>"));
    }

    #[test]
    fn test_text_escaping() {
        let (mut schedule, mut slugs) = two_day_schedule();
        let mut data = test_event_data("1", "Q&A <live>", "10:00");
        data.persons[0].name = "Amp & Sand".to_string();
        add(&mut schedule, &mut slugs, 1, "R&D \"Lab\"", data);
        let xml = schedule.to_xml().unwrap();
        assert!(xml.contains("<title>Q&amp;A &lt;live&gt;</title>"));
        assert!(xml.contains("Amp &amp; Sand"));
        assert!(xml.contains("name=\"R&amp;D &quot;Lab&quot;\""));
    }

    #[test]
    fn test_rooms_without_events_are_omitted_per_day() {
        let (mut schedule, mut slugs) = two_day_schedule();
        schedule.add_room("Hall A");
        schedule.add_room("Hall B");
        add(
            &mut schedule,
            &mut slugs,
            1,
            "Hall A",
            test_event_data("1", "Opening", "10:00"),
        );
        add(
            &mut schedule,
            &mut slugs,
            2,
            "Hall B",
            test_event_data("2", "Closing", "17:00"),
        );
        let xml = schedule.to_xml().unwrap();
        // One room element per day, although both rooms are globally known
        assert_eq!(xml.matches("<room name=").count(), 2);
        let day2 = &xml[xml.find("<day index=\"2\"").unwrap()..];
        assert!(!day2.contains("Hall A"));
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let (mut schedule, mut slugs) = two_day_schedule();
        for (uid, title, start) in [
            ("1", "Opening", "10:00"),
            ("2", "Keynote", "11:00"),
            ("3", "Closing", "17:00"),
        ] {
            add(
                &mut schedule,
                &mut slugs,
                1,
                "Hall A",
                test_event_data(uid, title, start),
            );
        }
        assert_eq!(schedule.to_xml().unwrap(), schedule.to_xml().unwrap());
    }

    #[test]
    fn test_events_render_in_start_time_order() {
        let (mut schedule, mut slugs) = two_day_schedule();
        add(
            &mut schedule,
            &mut slugs,
            1,
            "Hall A",
            test_event_data("1", "Second", "10:00"),
        );
        add(
            &mut schedule,
            &mut slugs,
            1,
            "Hall A",
            test_event_data("2", "First", "09:00"),
        );
        let xml = schedule.to_xml().unwrap();
        let first = xml.find("<title>First</title>").unwrap();
        let second = xml.find("<title>Second</title>").unwrap();
        assert!(first < second);
    }
}
