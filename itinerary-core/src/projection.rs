//! Derived schedule views: by day, by fixed time slot, and by entity.
//!
//! All projections are pure functions of the event list they are given and
//! are recomputed on demand; nothing here is cached.

use crate::dataset::ScheduleEvent;
use crate::time::{ClockTime, parse_clock_time, parse_time_to_minutes};

/// Events of one day, in chronological order.
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup<'a> {
    pub day: &'a str,
    pub events: Vec<&'a ScheduleEvent>,
}

/// Events starting exactly at one grid slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotGroup<'a> {
    pub slot: ClockTime,
    pub events: Vec<&'a ScheduleEvent>,
}

/// Events sharing one entity key (a broker id or an assignee id), grouped by day.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityGroup<'a> {
    pub key: &'a str,
    pub days: Vec<DayGroup<'a>>,
}

impl<'a> EntityGroup<'a> {
    pub fn event_count(&self) -> usize {
        self.days.iter().map(|d| d.events.len()).sum()
    }

    pub fn events(&self) -> impl Iterator<Item = &'a ScheduleEvent> + '_ {
        self.days.iter().flat_map(|d| d.events.iter().copied())
    }
}

/// Partition by day (first-seen day order), then stable-sort each day by start time.
///
/// Unscheduled or unparseable times sort after every valid time within their day.
/// Events with equal times keep their input order.
pub fn group_by_day_chronological<'a, I>(events: I) -> Vec<DayGroup<'a>>
where
    I: IntoIterator<Item = &'a ScheduleEvent>,
{
    let mut groups: Vec<DayGroup<'a>> = Vec::new();

    for event in events {
        match groups.iter_mut().find(|g| g.day == event.day) {
            Some(group) => group.events.push(event),
            None => groups.push(DayGroup {
                day: &event.day,
                events: vec![event],
            }),
        }
    }

    for group in &mut groups {
        // `sort_by_key` is stable
        group.events.sort_by_key(|e| parse_time_to_minutes(&e.time));
    }

    groups
}

/// Bucket scheduled events into the given slots, keeping only non-empty slots.
///
/// Both slot labels and event times are normalized to `H:MM AM/PM` before
/// comparison, so `"8:30am"`, `"8:30 AM"` and `"08:30 AM"` share a slot.
/// Labels that do not parse are ignored.
pub fn group_by_fixed_slot<'a, I, S>(events: I, slot_labels: &[S]) -> Vec<SlotGroup<'a>>
where
    I: IntoIterator<Item = &'a ScheduleEvent>,
    S: AsRef<str>,
{
    let timed: Vec<(ClockTime, &'a ScheduleEvent)> = events
        .into_iter()
        .filter_map(|e| e.start_time().ok().map(|t| (t, e)))
        .collect();

    slot_labels
        .iter()
        .filter_map(|label| parse_clock_time(label.as_ref()).ok())
        .filter_map(|slot| {
            let matching: Vec<&'a ScheduleEvent> = timed
                .iter()
                .filter(|(time, _)| *time == slot)
                .map(|(_, e)| *e)
                .collect();

            (!matching.is_empty()).then_some(SlotGroup {
                slot,
                events: matching,
            })
        })
        .collect()
}

/// Group events by an entity key, first-seen key order, each group split by day.
///
/// Events for which `key_fn` returns `None` (e.g. unassigned events) are left out.
pub fn group_by_entity<'a, I, F>(events: I, key_fn: F) -> Vec<EntityGroup<'a>>
where
    I: IntoIterator<Item = &'a ScheduleEvent>,
    F: Fn(&'a ScheduleEvent) -> Option<&'a str>,
{
    let mut buckets: Vec<(&'a str, Vec<&'a ScheduleEvent>)> = Vec::new();

    for event in events {
        let Some(key) = key_fn(event) else {
            continue;
        };
        match buckets.iter_mut().find(|(k, _)| *k == key) {
            Some((_, bucket)) => bucket.push(event),
            None => buckets.push((key, vec![event])),
        }
    }

    buckets
        .into_iter()
        .map(|(key, bucket)| EntityGroup {
            key,
            days: group_by_day_chronological(bucket),
        })
        .collect()
}

/// Key extractor for broker summaries.
pub fn by_broker(event: &ScheduleEvent) -> Option<&str> {
    Some(event.broker.as_str())
}

/// Key extractor for team-member summaries.
pub fn by_assignee(event: &ScheduleEvent) -> Option<&str> {
    event.assigned_to.as_deref()
}

/// Scheduled events of one day, stably sorted by start time.
///
/// This is the working set of the grid view and of per-day calendar exports.
pub fn scheduled_for_day<'a, I>(events: I, day: &str) -> Vec<&'a ScheduleEvent>
where
    I: IntoIterator<Item = &'a ScheduleEvent>,
{
    let mut day_events: Vec<&'a ScheduleEvent> = events
        .into_iter()
        .filter(|e| e.day == day && e.is_scheduled())
        .collect();
    day_events.sort_by_key(|e| parse_time_to_minutes(&e.time));
    day_events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::event;

    fn ids(events: &[&ScheduleEvent]) -> Vec<String> {
        events.iter().map(|e| e.id.clone()).collect()
    }

    #[test]
    fn test_day_grouping_orders_unscheduled_last() {
        let events = vec![
            event("a", "monday", "10:00 AM"),
            event("b", "monday", "9:00 AM"),
            event("c", "monday", "TBD"),
        ];

        let groups = group_by_day_chronological(&events);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].day, "monday");
        assert_eq!(ids(&groups[0].events), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_day_grouping_is_stable_for_equal_times() {
        let events = vec![
            event("first", "monday", "9:00 AM"),
            event("early", "monday", "8:00 AM"),
            event("second", "monday", "9:00am"),
        ];

        let groups = group_by_day_chronological(&events);
        assert_eq!(ids(&groups[0].events), vec!["early", "first", "second"]);
    }

    #[test]
    fn test_day_grouping_keeps_first_seen_day_order() {
        let events = vec![
            event("t1", "tuesday", "9:00 AM"),
            event("m1", "monday", "11:00 AM"),
            event("t2", "tuesday", "8:00 AM"),
        ];

        let groups = group_by_day_chronological(&events);
        let days: Vec<&str> = groups.iter().map(|g| g.day).collect();
        assert_eq!(days, vec!["tuesday", "monday"]);
        assert_eq!(ids(&groups[0].events), vec!["t2", "t1"]);
    }

    #[test]
    fn test_day_grouping_is_sorted_within_each_day() {
        let events = vec![
            event("1", "monday", "2:00 PM"),
            event("2", "monday", "bogus"),
            event("3", "monday", "12:15 PM"),
            event("4", "monday", "12:00 AM"),
            event("5", "monday", "11:45 AM"),
        ];

        let groups = group_by_day_chronological(&events);
        let keys: Vec<u16> = groups[0]
            .events
            .iter()
            .map(|e| parse_time_to_minutes(&e.time))
            .collect();
        assert!(keys.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(ids(&groups[0].events), vec!["4", "5", "3", "1", "2"]);
    }

    #[test]
    fn test_fixed_slots_normalize_and_stay_sparse() {
        let events = vec![
            event("a", "monday", "8:30am"),
            event("b", "monday", "08:30 AM"),
            event("c", "monday", "TBD"),
            event("d", "monday", "10:00 AM"),
            event("e", "monday", "10:15 AM"),
        ];
        let slots = ["8:00 AM", "8:30 AM", "9:00 AM", "9:30 AM", "10:00 AM"];

        let grid = group_by_fixed_slot(&events, &slots);
        let labels: Vec<String> = grid.iter().map(|g| g.slot.to_string()).collect();
        assert_eq!(labels, vec!["8:30 AM", "10:00 AM"]);
        assert_eq!(ids(&grid[0].events), vec!["a", "b"]);
        assert_eq!(ids(&grid[1].events), vec!["d"]);

        let all_ids: Vec<&str> = grid
            .iter()
            .flat_map(|g| g.events.iter().map(|e| e.id.as_str()))
            .collect();
        assert!(!all_ids.contains(&"c"));
    }

    #[test]
    fn test_group_by_broker_splits_days() {
        let mut events = vec![
            event("a", "monday", "10:00 AM"),
            event("b", "tuesday", "9:00 AM"),
            event("c", "monday", "9:00 AM"),
            event("d", "monday", "1:00 PM"),
        ];
        events[3].broker = "baird".into();

        let groups = group_by_entity(&events, by_broker);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, "keybanc");
        assert_eq!(groups[0].event_count(), 3);
        assert_eq!(groups[0].days[0].day, "monday");
        assert_eq!(ids(&groups[0].days[0].events), vec!["c", "a"]);
        assert_eq!(groups[0].days[1].day, "tuesday");
        assert_eq!(groups[1].key, "baird");
    }

    #[test]
    fn test_group_by_assignee_skips_unassigned() {
        let mut events = vec![
            event("a", "monday", "10:00 AM"),
            event("b", "monday", "9:00 AM"),
            event("c", "monday", "8:00 AM"),
        ];
        events[0].assigned_to = Some("alice".into());
        events[2].assigned_to = Some("alice".into());

        let groups = group_by_entity(&events, by_assignee);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key, "alice");
        let ordered: Vec<&str> = groups[0].events().map(|e| e.id.as_str()).collect();
        assert_eq!(ordered, vec!["c", "a"]);
    }

    #[test]
    fn test_scheduled_for_day() {
        let events = vec![
            event("a", "monday", "10:00 AM"),
            event("b", "tuesday", "9:00 AM"),
            event("c", "monday", "TBD"),
            event("d", "monday", "8:00 AM"),
        ];

        assert_eq!(ids(&scheduled_for_day(&events, "monday")), vec!["d", "a"]);
        assert!(scheduled_for_day(&events, "wednesday").is_empty());
    }
}
