//! The static itinerary dataset.
//!
//! Mirrors the JSON document the viewer is built from. Everything here is
//! read-only after load except `ScheduleEvent::assigned_to`, which is owned by
//! the assignment store and overlaid onto the schedule.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ItineraryError, ItineraryResult};
use crate::time::{ClockTime, TimeParseError, parse_clock_time};

/// Conference-level metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventInfo {
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub dates: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerContact {
    pub name: String,
    #[serde(default)]
    pub role: String,
}

/// Free text that the dataset stores either as one string or as a list of sentences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextOrList {
    Text(String),
    List(Vec<String>),
}

impl std::fmt::Display for TextOrList {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            TextOrList::Text(text) => write!(f, "{text}"),
            TextOrList::List(items) => write!(f, "{}", items.join(". ")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Broker {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub analysts: Vec<String>,
    #[serde(default)]
    pub sales: Vec<String>,
    #[serde(default)]
    pub team: Vec<BrokerContact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insights: Option<TextOrList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<TextOrList>,
}

impl Broker {
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.name)
    }

    /// People the broker is bringing: named team plus analysts.
    pub fn team_size(&self) -> usize {
        self.team.len() + self.analysts.len()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub ticker: String,
    pub name: String,
    #[serde(default)]
    pub booth: String,
    #[serde(default)]
    pub segment: String,
    #[serde(default)]
    pub stack_position: String,
    #[serde(default)]
    pub tldr: String,
    #[serde(default)]
    pub value_prop: String,
    #[serde(default)]
    pub market_cap: String,
    #[serde(default)]
    pub key_products: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

/// One scheduled activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEvent {
    pub id: String,
    pub day: String,
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    /// Category tag ("meeting", "booth_tour", ...). Presentation only.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub broker: String,
    #[serde(default)]
    pub ticker: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub booth: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Minutes. Informational; exports do not derive end times from it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ScheduleEvent {
    pub fn start_time(&self) -> Result<ClockTime, TimeParseError> {
        parse_clock_time(&self.time)
    }

    pub fn end_clock_time(&self) -> Option<ClockTime> {
        self.end_time
            .as_deref()
            .and_then(|t| parse_clock_time(t).ok())
    }

    /// True when the start time parses; unscheduled and malformed times are not.
    pub fn is_scheduled(&self) -> bool {
        self.start_time().is_ok()
    }

    /// The start portion of the display time, e.g. "10:00am" from "10:00am-10:30am PST".
    pub fn start_label(&self) -> &str {
        self.time.split('-').next().unwrap_or(&self.time).trim()
    }
}

/// The full dataset document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub event: EventInfo,
    #[serde(default)]
    pub conestoga_team: Vec<TeamMember>,
    #[serde(default)]
    pub brokers: Vec<Broker>,
    #[serde(default)]
    pub schedule: Vec<ScheduleEvent>,
    #[serde(default)]
    pub companies: Vec<Company>,
}

impl Itinerary {
    pub fn from_json(content: &str) -> ItineraryResult<Self> {
        serde_json::from_str(content).map_err(|e| ItineraryError::DatasetParse(e.to_string()))
    }

    /// Read the dataset once from disk.
    pub async fn fetch(path: &Path) -> ItineraryResult<Self> {
        let content =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|e| ItineraryError::DatasetFetch {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?;

        let itinerary = Self::from_json(&content)?;
        tracing::debug!(
            path = %path.display(),
            events = itinerary.schedule.len(),
            brokers = itinerary.brokers.len(),
            companies = itinerary.companies.len(),
            "loaded itinerary dataset"
        );
        Ok(itinerary)
    }

    // LOOKUPS:

    pub fn broker(&self, id: &str) -> Option<&Broker> {
        self.brokers.iter().find(|b| b.id == id)
    }

    /// Short broker name, or the raw id when the broker is unknown.
    pub fn broker_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.broker(id).map(|b| b.name.as_str()).unwrap_or(id)
    }

    pub fn team_member(&self, id: &str) -> Option<&TeamMember> {
        self.conestoga_team.iter().find(|m| m.id == id)
    }

    /// Team member name, or the raw id when the member is unknown.
    pub fn team_member_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.team_member(id).map(|m| m.name.as_str()).unwrap_or(id)
    }

    pub fn company(&self, ticker: &str) -> Option<&Company> {
        self.companies.iter().find(|c| c.ticker == ticker)
    }

    pub fn event(&self, id: &str) -> Option<&ScheduleEvent> {
        self.schedule.iter().find(|e| e.id == id)
    }

    pub(crate) fn event_mut(&mut self, id: &str) -> Option<&mut ScheduleEvent> {
        self.schedule.iter_mut().find(|e| e.id == id)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn event(id: &str, day: &str, time: &str) -> ScheduleEvent {
        ScheduleEvent {
            id: id.to_string(),
            day: day.to_string(),
            time: time.to_string(),
            end_time: None,
            kind: "meeting".to_string(),
            broker: "keybanc".to_string(),
            ticker: "CARR".to_string(),
            company: "Carrier Global".to_string(),
            booth: String::new(),
            location: None,
            host: None,
            duration: None,
            travel: None,
            assigned_to: None,
            notes: None,
        }
    }

    pub const SAMPLE_JSON: &str = r##"{
        "event": { "name": "AHR Expo 2026", "location": "Las Vegas, NV", "dates": "Feb 2-3, 2026" },
        "conestogaTeam": [
            { "id": "alice", "name": "Alice Chen" },
            { "id": "bob", "name": "Bob Diaz" }
        ],
        "brokers": [
            { "id": "keybanc", "name": "KeyBanc", "fullName": "KeyBanc Capital Markets", "color": "#1f77b4",
              "analysts": ["Jeff Hammond"], "team": [{ "name": "Sam Lee", "role": "Sales" }],
              "insights": ["Strong HVAC demand", "Watch data centers"] },
            { "id": "baird", "name": "Baird", "fullName": "Robert W. Baird", "color": "#2ca02c",
              "insights": "Focus on residential" }
        ],
        "schedule": [
            { "id": "e1", "day": "monday", "time": "10:00 AM", "endTime": "10:30 AM", "type": "meeting",
              "broker": "keybanc", "ticker": "CARR", "company": "Carrier Global", "booth": "C1234",
              "host": "Jeff Hammond", "duration": 30, "assignedTo": null },
            { "id": "e2", "day": "monday", "time": "9:00 AM", "type": "booth_tour",
              "broker": "baird", "ticker": "TT", "company": "Trane Technologies", "booth": "",
              "location": "North Hall", "assignedTo": "alice", "notes": "Bring samples" },
            { "id": "e3", "day": "monday", "time": "TBD", "type": "meeting",
              "broker": "keybanc", "ticker": "LII", "company": "Lennox", "booth": "N200", "assignedTo": null },
            { "id": "e4", "day": "tuesday", "time": "8:30am", "type": "meeting",
              "broker": "baird", "ticker": "CARR", "company": "Carrier Global", "booth": "C1234", "assignedTo": null }
        ],
        "companies": [
            { "ticker": "TT", "name": "Trane Technologies", "booth": "S100", "segment": "HVAC",
              "stackPosition": "OEM", "tldr": "", "valueProp": "", "marketCap": "$80B", "keyProducts": [], "notes": "" },
            { "ticker": "CARR", "name": "Carrier Global", "booth": "C1234", "segment": "HVAC",
              "stackPosition": "OEM", "tldr": "", "valueProp": "", "marketCap": "$50B", "keyProducts": ["Heat pumps"], "notes": "" },
            { "ticker": "LII", "name": "Lennox", "booth": "N200", "segment": "HVAC",
              "stackPosition": "OEM", "tldr": "", "valueProp": "", "marketCap": "$20B", "keyProducts": [], "notes": "" }
        ]
    }"##;

    pub fn sample() -> Itinerary {
        Itinerary::from_json(SAMPLE_JSON).unwrap()
    }
}
