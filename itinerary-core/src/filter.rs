//! Conjunctive schedule filters (day, broker, company, assignee).

use std::collections::BTreeSet;

use crate::dataset::ScheduleEvent;

/// Value the viewer uses for "no restriction on this dimension".
pub const ALL: &str = "all";

/// Value the viewer uses for "events nobody is assigned to".
pub const UNASSIGNED: &str = "unassigned";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssigneeFilter {
    Member(String),
    Unassigned,
}

impl AssigneeFilter {
    pub fn matches(&self, assigned_to: Option<&str>) -> bool {
        match self {
            AssigneeFilter::Member(id) => assigned_to == Some(id.as_str()),
            AssigneeFilter::Unassigned => assigned_to.is_none(),
        }
    }
}

/// Filter state. `None` on a dimension means no restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub day: Option<String>,
    pub broker: Option<String>,
    pub ticker: Option<String>,
    pub assignee: Option<AssigneeFilter>,
}

impl FilterCriteria {
    /// Build criteria from the viewer's select values, where `"all"` (or absence)
    /// disables a dimension and `"unassigned"` selects events without an assignee.
    pub fn from_args(
        day: Option<&str>,
        broker: Option<&str>,
        ticker: Option<&str>,
        team: Option<&str>,
    ) -> Self {
        FilterCriteria {
            day: restriction(day),
            broker: restriction(broker),
            ticker: restriction(ticker),
            assignee: restriction(team).map(|team| {
                if team == UNASSIGNED {
                    AssigneeFilter::Unassigned
                } else {
                    AssigneeFilter::Member(team)
                }
            }),
        }
    }

    pub fn day(mut self, day: &str) -> Self {
        self.day = Some(day.to_string());
        self
    }

    pub fn broker(mut self, broker: &str) -> Self {
        self.broker = Some(broker.to_string());
        self
    }

    pub fn ticker(mut self, ticker: &str) -> Self {
        self.ticker = Some(ticker.to_string());
        self
    }

    pub fn assignee(mut self, assignee: AssigneeFilter) -> Self {
        self.assignee = Some(assignee);
        self
    }

    pub fn is_unrestricted(&self) -> bool {
        self == &FilterCriteria::default()
    }

    pub fn matches(&self, event: &ScheduleEvent) -> bool {
        if self.day.as_ref().is_some_and(|day| &event.day != day) {
            return false;
        }
        if self.broker.as_ref().is_some_and(|broker| &event.broker != broker) {
            return false;
        }
        if self.ticker.as_ref().is_some_and(|ticker| &event.ticker != ticker) {
            return false;
        }
        if let Some(ref assignee) = self.assignee {
            return assignee.matches(event.assigned_to.as_deref());
        }
        true
    }

    /// Keep the events matching every set dimension, in input order.
    pub fn apply<'a, I>(&self, events: I) -> Vec<&'a ScheduleEvent>
    where
        I: IntoIterator<Item = &'a ScheduleEvent>,
    {
        events.into_iter().filter(|e| self.matches(e)).collect()
    }
}

fn restriction(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != ALL)
        .map(String::from)
}

/// Sorted distinct tickers, the options of the company filter.
pub fn unique_tickers<'a, I>(events: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a ScheduleEvent>,
{
    events
        .into_iter()
        .map(|e| e.ticker.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures;

    fn ids(events: &[&ScheduleEvent]) -> Vec<String> {
        events.iter().map(|e| e.id.clone()).collect()
    }

    #[test]
    fn test_default_criteria_is_identity() {
        let itinerary = fixtures::sample();
        let criteria = FilterCriteria::default();
        assert!(criteria.is_unrestricted());

        let filtered = criteria.apply(&itinerary.schedule);
        let expected: Vec<&ScheduleEvent> = itinerary.schedule.iter().collect();
        assert_eq!(filtered, expected);
    }

    #[test]
    fn test_all_sentinel_is_unrestricted() {
        let criteria = FilterCriteria::from_args(Some("all"), Some("all"), None, Some("all"));
        assert!(criteria.is_unrestricted());
    }

    #[test]
    fn test_sequential_equals_conjunction() {
        let itinerary = fixtures::sample();

        let by_day = FilterCriteria::default().day("monday");
        let by_broker = FilterCriteria::default().broker("keybanc");
        let sequential = by_broker.apply(by_day.apply(&itinerary.schedule));

        let combined = FilterCriteria::default().day("monday").broker("keybanc");
        let at_once = combined.apply(&itinerary.schedule);

        assert_eq!(sequential, at_once);
        assert_eq!(ids(&at_once), vec!["e1", "e3"]);
    }

    #[test]
    fn test_filter_preserves_input_order() {
        let itinerary = fixtures::sample();
        let filtered = FilterCriteria::default().ticker("CARR").apply(&itinerary.schedule);
        assert_eq!(ids(&filtered), vec!["e1", "e4"]);
    }

    #[test]
    fn test_assignee_filters() {
        let itinerary = fixtures::sample();

        let alice = FilterCriteria::from_args(None, None, None, Some("alice"));
        assert_eq!(ids(&alice.apply(&itinerary.schedule)), vec!["e2"]);

        let unassigned = FilterCriteria::from_args(None, None, None, Some("unassigned"));
        assert_eq!(unassigned.assignee, Some(AssigneeFilter::Unassigned));
        assert_eq!(
            ids(&unassigned.apply(&itinerary.schedule)),
            vec!["e1", "e3", "e4"]
        );
    }

    #[test]
    fn test_unique_tickers_sorted() {
        let itinerary = fixtures::sample();
        assert_eq!(
            unique_tickers(&itinerary.schedule),
            vec!["CARR", "LII", "TT"]
        );
    }
}
