//! Conference day table: maps schedule day labels to calendar dates.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{ItineraryError, ItineraryResult};
use crate::time::{TimeParseError, parse_clock_time};

/// One day of the conference, e.g. `monday` → 2026-02-02.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConferenceDay {
    pub label: String,
    pub date: NaiveDate,
}

impl ConferenceDay {
    pub fn new(label: &str, date: NaiveDate) -> Self {
        ConferenceDay {
            label: label.to_string(),
            date,
        }
    }
}

/// Ordered, non-empty lookup of known event days.
#[derive(Debug, Clone)]
pub struct DayCalendar {
    days: Vec<ConferenceDay>,
}

impl DayCalendar {
    pub fn new(days: Vec<ConferenceDay>) -> ItineraryResult<Self> {
        if days.is_empty() {
            return Err(ItineraryError::Config(
                "At least one conference day must be configured".into(),
            ));
        }
        Ok(DayCalendar { days })
    }

    pub fn days(&self) -> &[ConferenceDay] {
        &self.days
    }

    pub fn is_known(&self, label: &str) -> bool {
        self.find(label).is_some()
    }

    /// The configured spelling of a day label, e.g. "Monday" → "monday".
    pub fn resolve(&self, label: &str) -> Option<&str> {
        self.find(label).map(|d| d.label.as_str())
    }

    /// Date for a day label. Unknown labels fall back to the first conference day.
    pub fn date_for(&self, label: &str) -> NaiveDate {
        match self.find(label) {
            Some(day) => day.date,
            None => {
                tracing::warn!(day = label, "unknown day label, using first conference day");
                self.days[0].date
            }
        }
    }

    /// Combine a day label and a time label into a local, offset-free timestamp.
    pub fn to_absolute_timestamp(
        &self,
        day: &str,
        display: &str,
    ) -> Result<NaiveDateTime, TimeParseError> {
        let time = parse_clock_time(display)?;
        let naive_time = time
            .to_naive_time()
            .ok_or(TimeParseError::OutOfRange {
                hour: time.hour(),
                minute: time.minute(),
            })?;
        Ok(self.date_for(day).and_time(naive_time))
    }

    fn find(&self, label: &str) -> Option<&ConferenceDay> {
        self.days
            .iter()
            .find(|d| d.label.eq_ignore_ascii_case(label.trim()))
    }
}

impl Default for DayCalendar {
    /// AHR Expo 2026: Monday Feb 2 and Tuesday Feb 3.
    fn default() -> Self {
        DayCalendar {
            days: default_days(),
        }
    }
}

pub fn default_days() -> Vec<ConferenceDay> {
    [("monday", 2), ("tuesday", 3)]
        .into_iter()
        .filter_map(|(label, day)| {
            NaiveDate::from_ymd_opt(2026, 2, day).map(|date| ConferenceDay::new(label, date))
        })
        .collect()
}
