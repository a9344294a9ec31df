use anyhow::Result;
use itinerary_core::itinerary_config::ItineraryConfig;
use itinerary_core::projection::{group_by_fixed_slot, scheduled_for_day};
use itinerary_core::session::Session;
use itinerary_core::store::KeyValueStore;
use owo_colors::OwoColorize;

use crate::render::{Render, day_heading, pluralize};

pub fn run<S: KeyValueStore>(session: &Session<S>, config: &ItineraryConfig, day: &str) -> Result<()> {
    let itinerary = session.itinerary()?;
    let days = config.day_calendar()?;
    let Some(day) = days.resolve(day) else {
        let available: Vec<&str> = days.days().iter().map(|d| d.label.as_str()).collect();
        anyhow::bail!("Day '{}' not found. Available: {}", day, available.join(", "));
    };

    let events = scheduled_for_day(&itinerary.schedule, day);
    let slots = config.slot_labels()?;
    let grid = group_by_fixed_slot(events.iter().copied(), &slots);

    println!(
        "{} {}",
        day_heading(day).bold(),
        format!("({} scheduled {})", events.len(), pluralize("event", events.len())).dimmed()
    );

    if grid.is_empty() {
        println!("  {}", "Nothing on the grid".dimmed());
    }
    for slot in &grid {
        println!("{}", slot.render(itinerary));
    }

    // Events outside the grid window still count toward the day
    let placed: usize = grid.iter().map(|g| g.events.len()).sum();
    if placed < events.len() {
        println!(
            "{}",
            format!("{} outside {} to {}", events.len() - placed, config.slot_start, config.slot_end)
                .dimmed()
        );
    }

    Ok(())
}
