//! Event → team member assignments.

use std::collections::BTreeMap;

use crate::constants::ASSIGNMENTS_KEY;
use crate::dataset::ScheduleEvent;
use crate::error::ItineraryResult;
use crate::store::{KeyValueStore, read_map, write_map};

/// Assignment map persisted under `ahr-assignments`.
///
/// An explicit `None` records "unassigned" and persists as JSON `null`.
pub struct AssignmentStore<S> {
    port: S,
    assignments: BTreeMap<String, Option<String>>,
}

impl<S: KeyValueStore> AssignmentStore<S> {
    /// Hydrate from the port. Missing or malformed state yields an empty map.
    pub fn load(port: S) -> Self {
        let assignments = read_map(&port, ASSIGNMENTS_KEY);
        AssignmentStore { port, assignments }
    }

    /// Assignee for an event; unknown events are unassigned.
    pub fn get(&self, event_id: &str) -> Option<&str> {
        self.assignments.get(event_id).and_then(|a| a.as_deref())
    }

    /// Record an assignment (or `None` to unassign) and persist the whole map.
    /// The in-memory map only changes once the write succeeds.
    pub fn set(&mut self, event_id: &str, member_id: Option<&str>) -> ItineraryResult<()> {
        let mut next = self.assignments.clone();
        next.insert(event_id.to_string(), member_id.map(String::from));
        write_map(&mut self.port, ASSIGNMENTS_KEY, &next)?;
        self.assignments = next;
        Ok(())
    }

    pub fn entries(&self) -> &BTreeMap<String, Option<String>> {
        &self.assignments
    }

    /// Apply recorded assignments to the schedule. Events without a record keep
    /// the assignee the dataset shipped with.
    pub fn overlay(&self, schedule: &mut [ScheduleEvent]) {
        for event in schedule.iter_mut() {
            if let Some(recorded) = self.assignments.get(&event.id) {
                event.assigned_to = recorded.clone();
            }
        }
    }

    pub fn into_port(self) -> S {
        self.port
    }
}
