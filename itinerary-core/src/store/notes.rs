//! Free-text notes per company ticker.

use std::collections::BTreeMap;

use crate::constants::COMPANY_NOTES_KEY;
use crate::error::ItineraryResult;
use crate::store::{KeyValueStore, read_map, write_map};

pub struct NotesStore<S> {
    port: S,
    notes: BTreeMap<String, String>,
}

impl<S: KeyValueStore> NotesStore<S> {
    pub fn load(port: S) -> Self {
        let notes = read_map(&port, COMPANY_NOTES_KEY);
        NotesStore { port, notes }
    }

    pub fn get(&self, ticker: &str) -> Option<&str> {
        self.notes.get(ticker).map(String::as_str)
    }

    pub fn has_note(&self, ticker: &str) -> bool {
        self.get(ticker).is_some_and(|n| !n.is_empty())
    }

    /// Replace the note for `ticker` and persist every note.
    pub fn set(&mut self, ticker: &str, note: &str) -> ItineraryResult<()> {
        let mut next = self.notes.clone();
        next.insert(ticker.to_string(), note.to_string());
        write_map(&mut self.port, COMPANY_NOTES_KEY, &next)?;
        self.notes = next;
        Ok(())
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.notes
    }

    pub fn into_port(self) -> S {
        self.port
    }
}
