//! ICS document generation.

use chrono::NaiveDateTime;
use icalendar::{Calendar, Component, EventLike, Property};

use crate::constants::{DEFAULT_LOCATION, DEFAULT_PRODID};
use crate::dataset::{Broker, ScheduleEvent};
use crate::days::DayCalendar;

/// Serializes schedule events into a publishable calendar.
pub struct CalendarExporter<'a> {
    days: &'a DayCalendar,
    brokers: &'a [Broker],
    prodid: String,
    default_location: String,
}

impl<'a> CalendarExporter<'a> {
    pub fn new(days: &'a DayCalendar, brokers: &'a [Broker]) -> Self {
        CalendarExporter {
            days,
            brokers,
            prodid: DEFAULT_PRODID.to_string(),
            default_location: DEFAULT_LOCATION.to_string(),
        }
    }

    pub fn with_prodid(mut self, prodid: &str) -> Self {
        self.prodid = prodid.to_string();
        self
    }

    pub fn with_default_location(mut self, location: &str) -> Self {
        self.default_location = location.to_string();
        self
    }

    /// Generate the calendar document.
    ///
    /// Events whose start time cannot be parsed are skipped. `DTEND` comes from
    /// `end_time` when it parses and repeats `DTSTART` otherwise; `duration` is
    /// not consulted.
    pub fn export<'e, I>(&self, events: I) -> String
    where
        I: IntoIterator<Item = &'e ScheduleEvent>,
    {
        // Calendar::new() would prefill its own PRODID
        let mut cal = Calendar::empty();
        cal.append_property(Property::new("VERSION", "2.0"));
        cal.append_property(Property::new("PRODID", self.prodid.as_str()));
        cal.append_property(Property::new("CALSCALE", "GREGORIAN"));
        cal.append_property(Property::new("METHOD", "PUBLISH"));

        let mut exported = 0usize;
        for event in events {
            let start = match self.days.to_absolute_timestamp(&event.day, &event.time) {
                Ok(start) => start,
                Err(error) => {
                    tracing::warn!(event = %event.id, %error, "skipping event without a start time");
                    continue;
                }
            };
            let end = event
                .end_time
                .as_deref()
                .and_then(|end| self.days.to_absolute_timestamp(&event.day, end).ok())
                .unwrap_or(start);

            let mut ics_event = icalendar::Event::new();
            // Floating times: no Z, no TZID
            ics_event.add_property("DTSTART", format_timestamp(&start));
            ics_event.add_property("DTEND", format_timestamp(&end));
            ics_event.summary(&self.summary(event));
            ics_event.description(&description(event));
            ics_event.location(&self.location(event));

            cal.push(ics_event.done());
            exported += 1;
        }

        let cal = cal.done();
        tracing::debug!(events = exported, "generated calendar export");
        strip_ics_bloat(&cal.to_string())
    }

    /// "TICKER - Broker", falling back to the raw broker id.
    fn summary(&self, event: &ScheduleEvent) -> String {
        let broker = self
            .brokers
            .iter()
            .find(|b| b.id == event.broker)
            .map(|b| b.name.as_str())
            .unwrap_or(&event.broker);
        format!("{} - {}", event.ticker, broker)
    }

    /// Booth, then explicit location, then the venue default.
    fn location(&self, event: &ScheduleEvent) -> String {
        if !event.booth.is_empty() {
            return format!("Booth {}", event.booth);
        }
        event
            .location
            .as_deref()
            .filter(|l| !l.is_empty())
            .unwrap_or(&self.default_location)
            .to_string()
    }
}

/// "Company | Host: name | notes", omitting empty parts.
fn description(event: &ScheduleEvent) -> String {
    let mut text = event.company.clone();
    if let Some(host) = event.host.as_deref().filter(|h| !h.is_empty()) {
        text.push_str(" | Host: ");
        text.push_str(host);
    }
    if let Some(notes) = event.notes.as_deref().filter(|n| !n.is_empty()) {
        text.push_str(" | ");
        text.push_str(notes);
    }
    text
}

/// Floating local time, `YYYYMMDDTHHMMSS`.
pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format("%Y%m%dT%H%M%S").to_string()
}

/// `<prefix>-<day>.ics`, or `<prefix>.ics` for multi-day exports.
pub fn export_filename(prefix: &str, day: Option<&str>) -> String {
    match day {
        Some(day) => format!("{prefix}-{}.ics", day.to_lowercase()),
        None => format!("{prefix}.ics"),
    }
}

/// Number of events `export` writes a VEVENT for.
pub fn exportable_count<'e, I>(events: I) -> usize
where
    I: IntoIterator<Item = &'e ScheduleEvent>,
{
    events.into_iter().filter(|e| e.is_scheduled()).count()
}

/// Clean up ICS output from the icalendar crate
/// - Remove the DTSTAMP and UID it adds to every VEVENT
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("DTSTAMP:") || line.starts_with("UID:") {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Itinerary, fixtures};
    use icalendar::parser::{read_calendar, unfold};

    /// RFC 5545 content lines should not exceed 75 octets, excluding CRLF.
    const MAX_LINE_OCTETS: usize = 75;

    fn export_all(itinerary: &Itinerary) -> String {
        let days = DayCalendar::default();
        CalendarExporter::new(&days, &itinerary.brokers).export(&itinerary.schedule)
    }

    #[test]
    fn test_empty_export_is_header_and_footer() {
        let days = DayCalendar::default();
        let ics = CalendarExporter::new(&days, &[]).export(std::iter::empty());

        assert_eq!(
            ics,
            "BEGIN:VCALENDAR\r\n\
             VERSION:2.0\r\n\
             PRODID:-//AHR Expo 2026//EN\r\n\
             CALSCALE:GREGORIAN\r\n\
             METHOD:PUBLISH\r\n\
             END:VCALENDAR\r\n"
        );
        assert!(!ics.contains("VEVENT"));
    }

    #[test]
    fn test_custom_prodid_replaces_default() {
        let days = DayCalendar::default();
        let ics = CalendarExporter::new(&days, &[])
            .with_prodid("-//Expo Team//EN")
            .export(std::iter::empty());

        assert_eq!(ics.matches("PRODID:").count(), 1);
        assert!(ics.contains("PRODID:-//Expo Team//EN\r\n"));
        assert!(!ics.contains("ICALENDAR-RS"));
    }

    #[test]
    fn test_event_block_fields() {
        let itinerary = fixtures::sample();
        let days = DayCalendar::default();
        let ics = CalendarExporter::new(&days, &itinerary.brokers).export(&itinerary.schedule[..1]);

        let expected_block = "BEGIN:VEVENT\r\n\
            DESCRIPTION:Carrier Global | Host: Jeff Hammond\r\n\
            DTEND:20260202T103000\r\n\
            DTSTART:20260202T100000\r\n\
            LOCATION:Booth C1234\r\n\
            SUMMARY:CARR - KeyBanc\r\n\
            END:VEVENT\r\n";
        assert!(ics.contains(expected_block), "ICS:\n{ics}");
    }

    #[test]
    fn test_no_uid_or_dtstamp() {
        let itinerary = fixtures::sample();
        let ics = export_all(&itinerary);

        assert!(!ics.contains("UID:"), "ICS:\n{ics}");
        assert!(!ics.contains("DTSTAMP:"), "ICS:\n{ics}");
        // Identical input gives identical output
        assert_eq!(ics, export_all(&itinerary));
    }

    #[test]
    fn test_end_defaults_to_start_and_location_precedence() {
        let itinerary = fixtures::sample();
        let days = DayCalendar::default();
        // e2: no endTime, no booth, explicit location, has notes
        let ics = CalendarExporter::new(&days, &itinerary.brokers).export(&itinerary.schedule[1..2]);

        assert!(ics.contains("DTSTART:20260202T090000\r\n"));
        assert!(ics.contains("DTEND:20260202T090000\r\n"));
        assert!(ics.contains("DESCRIPTION:Trane Technologies | Bring samples\r\n"));
        assert!(ics.contains("LOCATION:North Hall\r\n"));
    }

    #[test]
    fn test_default_location_and_unknown_broker() {
        let mut event = fixtures::event("x", "tuesday", "2:00 PM");
        event.broker = "jefferies".into();
        let days = DayCalendar::default();

        let ics = CalendarExporter::new(&days, &[])
            .with_default_location("Central Hall")
            .export([&event]);

        assert!(ics.contains("SUMMARY:CARR - jefferies\r\n"));
        assert!(ics.contains("LOCATION:Central Hall\r\n"));
        assert!(ics.contains("DTSTART:20260203T140000\r\n"));
    }

    #[test]
    fn test_unscheduled_events_are_skipped() {
        let itinerary = fixtures::sample();
        let ics = export_all(&itinerary);

        // e3 is TBD; the other three export
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 3);
        assert_eq!(exportable_count(&itinerary.schedule), 3);
        assert!(!ics.contains("LII"));
    }

    #[test]
    fn test_exportable_count_ignores_event_text() {
        let mut event = fixtures::event("x", "monday", "9:00 AM");
        event.notes = Some("BEGIN:VEVENT".into());
        let tbd = fixtures::event("y", "monday", "TBD");
        let days = DayCalendar::default();

        let ics = CalendarExporter::new(&days, &[]).export([&event, &tbd]);
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 2);
        assert_eq!(exportable_count([&event, &tbd]), 1);
    }

    #[test]
    fn test_text_values_are_escaped() {
        let mut event = fixtures::event("x", "monday", "9:00 AM");
        event.company = "Lennox, Inc; HVAC\\R".into();
        event.notes = Some("line one\nline two".into());
        let days = DayCalendar::default();

        let ics = CalendarExporter::new(&days, &[]).export([&event]);
        assert!(
            ics.contains("DESCRIPTION:Lennox\\, Inc\\; HVAC\\\\R | line one\\nline two\r\n"),
            "ICS:\n{ics}"
        );
    }

    #[test]
    fn test_long_lines_are_folded() {
        let mut event = fixtures::event("x", "monday", "9:00 AM");
        event.notes = Some("é".repeat(80));
        let days = DayCalendar::default();

        let ics = CalendarExporter::new(&days, &[]).export([&event]);
        for line in ics.split("\r\n") {
            assert!(line.len() <= MAX_LINE_OCTETS, "line too long: {line}");
        }
        assert!(ics.contains("\r\n "));
        assert!(unfold(&ics).contains(&"é".repeat(80)));
    }

    #[test]
    fn test_export_parses_with_icalendar() {
        let itinerary = fixtures::sample();
        let ics = export_all(&itinerary);

        let unfolded = unfold(&ics);
        let calendar = read_calendar(&unfolded).expect("export should parse");
        let vevents: Vec<_> = calendar
            .components
            .iter()
            .filter(|c| c.name == "VEVENT")
            .collect();
        assert_eq!(vevents.len(), 3);

        let first = vevents[0];
        assert_eq!(first.find_prop("DTSTART").unwrap().val.to_string(), "20260202T100000");
        assert_eq!(first.find_prop("SUMMARY").unwrap().val.to_string(), "CARR - KeyBanc");
        assert_eq!(first.find_prop("LOCATION").unwrap().val.to_string(), "Booth C1234");
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename("ahr-expo", Some("Monday")), "ahr-expo-monday.ics");
        assert_eq!(export_filename("ahr-expo", None), "ahr-expo.ics");
    }
}
