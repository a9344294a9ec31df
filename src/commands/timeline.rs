use anyhow::Result;
use itinerary_core::filter::{FilterCriteria, unique_tickers};
use itinerary_core::projection::group_by_day_chronological;
use itinerary_core::session::Session;
use itinerary_core::store::KeyValueStore;
use owo_colors::OwoColorize;

use crate::render::{Render, pluralize};

pub fn run<S: KeyValueStore>(session: &Session<S>, criteria: &FilterCriteria) -> Result<()> {
    let itinerary = session.itinerary()?;
    let events = criteria.apply(&itinerary.schedule);

    if events.is_empty() {
        println!("{}", "No events match these filters".dimmed());
        if criteria.ticker.is_some() {
            let tickers = unique_tickers(&itinerary.schedule);
            println!("{} {}", "Tickers:".dimmed(), tickers.join(", "));
        }
        return Ok(());
    }

    let days = group_by_day_chronological(events);
    for (i, day) in days.iter().enumerate() {
        println!("{}", day.render(itinerary));
        if i < days.len() - 1 {
            println!();
        }
    }

    if !criteria.is_unrestricted() {
        let shown: usize = days.iter().map(|d| d.events.len()).sum();
        println!();
        println!(
            "{}",
            format!(
                "{} of {} {}",
                shown,
                itinerary.schedule.len(),
                pluralize("event", itinerary.schedule.len())
            )
            .dimmed()
        );
    }

    Ok(())
}
