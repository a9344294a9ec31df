use std::path::PathBuf;

use itinerary_core::days::DayCalendar;
use itinerary_core::filter::{AssigneeFilter, FilterCriteria};
use itinerary_core::ics::CalendarExporter;
use itinerary_core::projection::{
    by_assignee, group_by_day_chronological, group_by_entity, group_by_fixed_slot,
    scheduled_for_day,
};
use itinerary_core::session::Session;
use itinerary_core::store::FileStore;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/itinerary_data.json")
}

fn ids<'a>(events: impl IntoIterator<Item = &'a itinerary_core::ScheduleEvent>) -> Vec<&'a str> {
    events.into_iter().map(|e| e.id.as_str()).collect()
}

#[tokio::test]
async fn test_full_session_round_trip() {
    let state = tempfile::tempdir().unwrap();

    let mut session = Session::new(FileStore::new(state.path()), FileStore::new(state.path()));
    session.load(&fixture_path()).await.unwrap();

    // Chronological view: stable for m2/m3 at 9:00, TBD last
    let schedule = session.schedule().unwrap();
    let days = group_by_day_chronological(schedule);
    assert_eq!(days.len(), 2);
    assert_eq!(ids(days[0].events.iter().copied()), vec!["m2", "m3", "m1", "m4"]);
    assert_eq!(ids(days[1].events.iter().copied()), vec!["t1"]);

    session.assign("m1", Some("alice")).unwrap();
    session.assign("t1", Some("alice")).unwrap();
    session.assign("m2", Some("bob")).unwrap();
    session.assign("m2", None).unwrap();
    session.set_note("CARR", "Ask about data center chillers").unwrap();

    // A fresh session over the same state directory sees the edits
    let mut reopened = Session::new(FileStore::new(state.path()), FileStore::new(state.path()));
    reopened.load(&fixture_path()).await.unwrap();
    assert_eq!(reopened.note("CARR"), Some("Ask about data center chillers"));

    let schedule = reopened.schedule().unwrap();
    let alice = FilterCriteria::default().assignee(AssigneeFilter::Member("alice".into()));
    assert_eq!(ids(alice.apply(schedule)), vec!["m1", "t1"]);

    let unassigned = FilterCriteria::default()
        .day("monday")
        .assignee(AssigneeFilter::Unassigned);
    assert_eq!(ids(unassigned.apply(schedule)), vec!["m2", "m3", "m4"]);

    let by_member = group_by_entity(schedule, by_assignee);
    assert_eq!(by_member.len(), 1);
    assert_eq!(by_member[0].key, "alice");
    assert_eq!(by_member[0].days.len(), 2);
}

#[tokio::test]
async fn test_grid_and_export_for_one_day() {
    let state = tempfile::tempdir().unwrap();
    let mut session = Session::new(FileStore::new(state.path()), FileStore::new(state.path()));
    session.load(&fixture_path()).await.unwrap();

    let itinerary = session.itinerary().unwrap();
    let monday = scheduled_for_day(&itinerary.schedule, "monday");
    assert_eq!(ids(monday.iter().copied()), vec!["m2", "m3", "m1"]);

    let grid = group_by_fixed_slot(monday.iter().copied(), &["8:30 AM", "9:00 AM", "9:30 AM", "10:00 AM"]);
    let slots: Vec<String> = grid.iter().map(|g| g.slot.to_string()).collect();
    assert_eq!(slots, vec!["9:00 AM", "10:00 AM"]);
    assert_eq!(grid[0].events.len(), 2);

    let days = DayCalendar::default();
    let ics = CalendarExporter::new(&days, &itinerary.brokers).export(monday);
    assert_eq!(ics.matches("BEGIN:VEVENT").count(), 3);
    assert!(ics.contains("LOCATION:Westgate\\, Room 4\r\n"));
    assert!(ics.contains("DTEND:20260202T104500\r\n"));
    assert!(ics.ends_with("END:VCALENDAR\r\n"));
}

#[tokio::test]
async fn test_missing_dataset_leaves_session_unavailable() {
    let state = tempfile::tempdir().unwrap();
    let mut session = Session::new(FileStore::new(state.path()), FileStore::new(state.path()));

    let missing = state.path().join("nope.json");
    assert!(session.load(&missing).await.is_err());
    assert!(!session.is_ready());
    assert!(session.schedule().is_err());
}
