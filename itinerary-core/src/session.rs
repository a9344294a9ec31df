//! Browsing session: the loaded dataset plus the two user-editable stores.

use std::path::Path;

use crate::dataset::{Itinerary, ScheduleEvent};
use crate::error::{ItineraryError, ItineraryResult};
use crate::store::{AssignmentStore, KeyValueStore, NotesStore};

/// Where the one-shot dataset fetch stands.
#[derive(Debug, Clone)]
pub enum DatasetState {
    /// Nothing loaded yet.
    Pending,
    Ready(Itinerary),
    /// The last fetch failed; `load` may be called again to retry.
    Unavailable(String),
}

pub struct Session<S> {
    state: DatasetState,
    assignments: AssignmentStore<S>,
    notes: NotesStore<S>,
}

impl<S: KeyValueStore> Session<S> {
    /// Hydrate both stores from their ports. The dataset starts out pending.
    pub fn new(assignment_port: S, notes_port: S) -> Self {
        Session {
            state: DatasetState::Pending,
            assignments: AssignmentStore::load(assignment_port),
            notes: NotesStore::load(notes_port),
        }
    }

    /// Fetch the dataset. On failure the session becomes `Unavailable` and the
    /// error is returned; calling `load` again retries.
    pub async fn load(&mut self, path: &Path) -> ItineraryResult<()> {
        match Itinerary::fetch(path).await {
            Ok(itinerary) => {
                self.install(itinerary);
                Ok(())
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "itinerary dataset unavailable");
                self.state = DatasetState::Unavailable(error.to_string());
                Err(error)
            }
        }
    }

    /// Use an already parsed dataset.
    pub fn install(&mut self, mut itinerary: Itinerary) {
        self.assignments.overlay(&mut itinerary.schedule);
        self.state = DatasetState::Ready(itinerary);
    }

    pub fn state(&self) -> &DatasetState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, DatasetState::Ready(_))
    }

    pub fn itinerary(&self) -> ItineraryResult<&Itinerary> {
        match &self.state {
            DatasetState::Ready(itinerary) => Ok(itinerary),
            DatasetState::Pending => Err(ItineraryError::NotReady),
            DatasetState::Unavailable(reason) => Err(ItineraryError::Unavailable(reason.clone())),
        }
    }

    pub fn schedule(&self) -> ItineraryResult<&[ScheduleEvent]> {
        Ok(&self.itinerary()?.schedule)
    }

    /// Assign an event to a team member, or unassign it with `None`.
    pub fn assign(&mut self, event_id: &str, member_id: Option<&str>) -> ItineraryResult<()> {
        let itinerary = match &mut self.state {
            DatasetState::Ready(itinerary) => itinerary,
            DatasetState::Pending => return Err(ItineraryError::NotReady),
            DatasetState::Unavailable(reason) => {
                return Err(ItineraryError::Unavailable(reason.clone()));
            }
        };
        let event = itinerary
            .event_mut(event_id)
            .ok_or_else(|| ItineraryError::EventNotFound(event_id.to_string()))?;

        // Persist before touching the schedule so a failed write changes nothing
        self.assignments.set(event_id, member_id)?;
        event.assigned_to = member_id.map(String::from);
        Ok(())
    }

    pub fn set_note(&mut self, ticker: &str, note: &str) -> ItineraryResult<()> {
        self.notes.set(ticker, note)
    }

    pub fn note(&self, ticker: &str) -> Option<&str> {
        self.notes.get(ticker)
    }

    pub fn notes(&self) -> &NotesStore<S> {
        &self.notes
    }

    pub fn assignments(&self) -> &AssignmentStore<S> {
        &self.assignments
    }
}
