use anyhow::Result;
use chrono::Local;
use itinerary_core::itinerary_config::ItineraryConfig;
use itinerary_core::session::Session;
use itinerary_core::store::KeyValueStore;
use itinerary_core::summary::next_event;
use owo_colors::OwoColorize;

use crate::render::{Render, day_heading};

pub fn run<S: KeyValueStore>(session: &Session<S>, config: &ItineraryConfig) -> Result<()> {
    let itinerary = session.itinerary()?;
    let days = config.day_calendar()?;
    let now = Local::now().naive_local();

    match next_event(&itinerary.schedule, &days, now) {
        Some(event) => {
            println!("{}", day_heading(&event.day).bold());
            println!("  {}", event.render(itinerary));
        }
        None => println!("{}", "No upcoming events".dimmed()),
    }

    Ok(())
}
