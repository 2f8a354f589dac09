//! Slug derivation for events
//!
//! A slug is the short, URL-safe, human-readable identifier of an event,
//! used as a display anchor and in generated permalink fields. Generators
//! hold their dedup memory as an explicit field, scoped to one conversion
//! run; there is no module-level state.

use std::collections::HashSet;

use crate::schedule::conference::Conference;
use crate::schedule::event::EventData;

/// Upper bound for the derived part of a slug, before dedup suffixes
const MAX_SLUG_LEN: usize = 64;

///
/// Capability to derive a unique slug from event fields
///
/// Implementations must never issue the same slug twice within one run,
/// even for events with identical titles and speakers.
///
pub trait SlugGenerator {
    /// Derive a slug for the given event fields, unique within this generator
    fn generate(&mut self, data: &EventData) -> String;
}

///
/// The default slug strategy: `<acronym>-<title>-<speaker...>`
///
/// Lower-cased, with non-alphanumeric runs collapsed to a single `-` and the
/// base truncated to a bounded length. On collision, a deterministic `-2`,
/// `-3`, ... suffix is appended.
///
#[derive(Debug, Clone, Default)]
pub struct StandardSlugGenerator {
    acronym: String,
    issued: HashSet<String>,
}

impl StandardSlugGenerator {
    /// Create a generator using the conference acronym as slug prefix
    pub fn new(conference: &Conference) -> Self {
        Self::with_acronym(conference.acronym().to_string())
    }

    /// Create a generator with an explicit acronym prefix
    pub fn with_acronym(acronym: String) -> Self {
        Self {
            acronym,
            issued: HashSet::new(),
        }
    }
}

impl SlugGenerator for StandardSlugGenerator {
    fn generate(&mut self, data: &EventData) -> String {
        let mut parts = vec![self.acronym.as_str(), data.title.as_str()];
        parts.extend(data.persons.iter().map(|p| p.name.as_str()));
        let base = truncate(slugify(&parts.join(" ")));
        dedup(&mut self.issued, &base)
    }
}

///
/// Alternative slug strategy using the event uid directly: `<acronym>-<uid>`
///
/// Gives the same uniqueness guarantee as [`StandardSlugGenerator`]; useful
/// when source uids are already stable and human-meaningful.
///
#[derive(Debug, Clone, Default)]
pub struct UidSlugGenerator {
    acronym: String,
    issued: HashSet<String>,
}

impl UidSlugGenerator {
    /// Create a generator using the conference acronym as slug prefix
    pub fn new(conference: &Conference) -> Self {
        Self {
            acronym: conference.acronym().to_string(),
            issued: HashSet::new(),
        }
    }
}

impl SlugGenerator for UidSlugGenerator {
    fn generate(&mut self, data: &EventData) -> String {
        let base = truncate(slugify(&format!("{} {}", self.acronym, data.uid)));
        dedup(&mut self.issued, &base)
    }
}

/// Lower-case and collapse non-alphanumeric runs to single dashes
fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    out
}

/// Cut the base down to [`MAX_SLUG_LEN`], never ending on a dash
fn truncate(mut base: String) -> String {
    // slugify output is pure ASCII, so byte indexing is char-safe
    base.truncate(MAX_SLUG_LEN);
    while base.ends_with('-') {
        base.pop();
    }
    base
}

/// Issue `base` if unused, otherwise the first free `base-2`, `base-3`, ...
fn dedup(issued: &mut HashSet<String>, base: &str) -> String {
    if issued.insert(base.to_string()) {
        return base.to_string();
    }
    let mut n: u64 = 2;
    loop {
        let candidate = format!("{base}-{n}");
        if issued.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::event::tests::test_event_data;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  Tabs\tand  spaces "), "tabs-and-spaces");
        assert_eq!(slugify("C++ & Rust: 2024"), "c-rust-2024");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn test_standard_slug() {
        let mut slugs = StandardSlugGenerator::with_acronym("exc".to_string());
        let slug = slugs.generate(&test_event_data("1", "Opening Ceremony", "10:00"));
        assert_eq!(slug, "exc-opening-ceremony-a-speaker");
    }

    #[test]
    fn test_collision_gets_deterministic_suffix() {
        let mut slugs = StandardSlugGenerator::with_acronym("exc".to_string());
        let data = test_event_data("1", "Opening", "10:00");
        let first = slugs.generate(&data);
        let second = slugs.generate(&data);
        let third = slugs.generate(&data);
        assert_eq!(first, "exc-opening-a-speaker");
        assert_eq!(second, "exc-opening-a-speaker-2");
        assert_eq!(third, "exc-opening-a-speaker-3");
    }

    #[test]
    fn test_truncation() {
        let mut slugs = StandardSlugGenerator::with_acronym("exc".to_string());
        let long_title = "word ".repeat(40);
        let slug = slugs.generate(&test_event_data("1", &long_title, "10:00"));
        assert!(slug.len() <= MAX_SLUG_LEN);
        assert!(!slug.ends_with('-'));
    }

    #[test]
    fn test_uid_slug() {
        let mut slugs = UidSlugGenerator {
            acronym: "exc".to_string(),
            issued: HashSet::new(),
        };
        let slug = slugs.generate(&test_event_data("42", "Opening", "10:00"));
        assert_eq!(slug, "exc-42");
        // Same uid twice still gets a distinct slug
        let slug2 = slugs.generate(&test_event_data("42", "Opening", "10:00"));
        assert_eq!(slug2, "exc-42-2");
    }
}
