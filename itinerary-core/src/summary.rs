//! Summary pages: per broker, per team member, company directory and coverage.

use chrono::NaiveDateTime;

use crate::dataset::{Broker, Company, Itinerary, ScheduleEvent, TeamMember};
use crate::days::DayCalendar;
use crate::projection::{DayGroup, group_by_day_chronological};
use crate::store::{KeyValueStore, NotesStore};

/// Distinct values in first-seen order.
fn distinct<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen: Vec<&'a str> = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

#[derive(Debug)]
pub struct BrokerSummary<'a> {
    /// None when the id is not in the broker table.
    pub broker: Option<&'a Broker>,
    pub broker_id: &'a str,
    pub total_events: usize,
    pub companies: Vec<&'a str>,
    pub team_size: usize,
    pub assigned: usize,
    pub days: Vec<DayGroup<'a>>,
}

impl<'a> BrokerSummary<'a> {
    pub fn build(itinerary: &'a Itinerary, broker_id: &'a str) -> Self {
        let events: Vec<&'a ScheduleEvent> = itinerary
            .schedule
            .iter()
            .filter(|e| e.broker == broker_id)
            .collect();
        let broker = itinerary.broker(broker_id);

        BrokerSummary {
            broker,
            broker_id,
            total_events: events.len(),
            companies: distinct(events.iter().map(|e| e.ticker.as_str())),
            team_size: broker.map(Broker::team_size).unwrap_or(0),
            assigned: events.iter().filter(|e| e.assigned_to.is_some()).count(),
            days: group_by_day_chronological(events),
        }
    }

    pub fn display_name(&self) -> &'a str {
        self.broker.map(Broker::display_name).unwrap_or(self.broker_id)
    }
}

#[derive(Debug)]
pub struct MemberSummary<'a> {
    pub member: Option<&'a TeamMember>,
    pub member_id: &'a str,
    pub total_events: usize,
    pub companies: Vec<&'a str>,
    pub brokers: Vec<&'a str>,
    pub days: Vec<DayGroup<'a>>,
}

impl<'a> MemberSummary<'a> {
    pub fn build(itinerary: &'a Itinerary, member_id: &'a str) -> Self {
        let events: Vec<&'a ScheduleEvent> = itinerary
            .schedule
            .iter()
            .filter(|e| e.assigned_to.as_deref() == Some(member_id))
            .collect();

        MemberSummary {
            member: itinerary.team_member(member_id),
            member_id,
            total_events: events.len(),
            companies: distinct(events.iter().map(|e| e.ticker.as_str())),
            brokers: distinct(events.iter().map(|e| e.broker.as_str())),
            days: group_by_day_chronological(events),
        }
    }

    pub fn display_name(&self) -> &'a str {
        self.member.map(|m| m.name.as_str()).unwrap_or(self.member_id)
    }
}

/// One row of the company directory.
#[derive(Debug)]
pub struct CompanyEntry<'a> {
    pub company: &'a Company,
    pub meetings: usize,
    pub has_notes: bool,
}

/// Companies sorted by ticker, with their meeting counts and note flags.
pub fn company_directory<'a, S: KeyValueStore>(
    itinerary: &'a Itinerary,
    notes: &NotesStore<S>,
) -> Vec<CompanyEntry<'a>> {
    let mut entries: Vec<CompanyEntry<'a>> = itinerary
        .companies
        .iter()
        .map(|company| CompanyEntry {
            company,
            meetings: itinerary
                .schedule
                .iter()
                .filter(|e| e.ticker == company.ticker)
                .count(),
            has_notes: notes.has_note(&company.ticker),
        })
        .collect();
    entries.sort_by(|a, b| a.company.ticker.cmp(&b.company.ticker));
    entries
}

/// Which brokers meet a given company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyCoverage<'a> {
    pub ticker: &'a str,
    pub company: &'a str,
    pub brokers: Vec<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageReport<'a> {
    pub companies: Vec<CompanyCoverage<'a>>,
    /// Companies met by exactly one broker.
    pub exclusive: usize,
    /// Companies met by more than one broker.
    pub multiple: usize,
    /// Distinct broker-company pairs.
    pub total_meetings: usize,
}

impl<'a> CoverageReport<'a> {
    pub fn build<I>(events: I) -> Self
    where
        I: IntoIterator<Item = &'a ScheduleEvent>,
    {
        let mut companies: Vec<CompanyCoverage<'a>> = Vec::new();

        for event in events {
            match companies.iter_mut().find(|c| c.ticker == event.ticker) {
                Some(coverage) => {
                    if !coverage.brokers.contains(&event.broker.as_str()) {
                        coverage.brokers.push(&event.broker);
                    }
                }
                None => companies.push(CompanyCoverage {
                    ticker: &event.ticker,
                    company: &event.company,
                    brokers: vec![event.broker.as_str()],
                }),
            }
        }
        companies.sort_by(|a, b| a.ticker.cmp(b.ticker));

        CoverageReport {
            exclusive: companies.iter().filter(|c| c.brokers.len() == 1).count(),
            multiple: companies.iter().filter(|c| c.brokers.len() > 1).count(),
            total_meetings: companies.iter().map(|c| c.brokers.len()).sum(),
            companies,
        }
    }

    /// Companies hearing from more than one broker.
    pub fn overlaps(&self) -> impl Iterator<Item = &CompanyCoverage<'a>> {
        self.companies.iter().filter(|c| c.brokers.len() > 1)
    }

    /// Number of companies a broker meets.
    pub fn broker_count(&self, broker_id: &str) -> usize {
        self.companies
            .iter()
            .filter(|c| c.brokers.iter().any(|b| *b == broker_id))
            .count()
    }
}

/// The scheduled event with the earliest start strictly after `now`.
pub fn next_event<'a, I>(events: I, days: &DayCalendar, now: NaiveDateTime) -> Option<&'a ScheduleEvent>
where
    I: IntoIterator<Item = &'a ScheduleEvent>,
{
    events
        .into_iter()
        .filter_map(|e| {
            days.to_absolute_timestamp(&e.day, &e.time)
                .ok()
                .map(|start| (start, e))
        })
        .filter(|(start, _)| *start > now)
        // min_by_key keeps the first of equal starts
        .min_by_key(|(start, _)| *start)
        .map(|(_, e)| e)
}
