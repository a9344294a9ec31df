use std::path::PathBuf;

use anyhow::{Context, Result};
use itinerary_core::filter::FilterCriteria;
use itinerary_core::ics::{CalendarExporter, export_filename, exportable_count};
use itinerary_core::itinerary_config::ItineraryConfig;
use itinerary_core::session::Session;
use itinerary_core::store::KeyValueStore;
use owo_colors::OwoColorize;

use crate::render::pluralize;

/// Write the filtered schedule as an iCalendar document.
///
/// `output` of `-` writes to stdout; `None` writes `<prefix>[-<day>].ics`
/// in the current directory.
pub fn run<S: KeyValueStore>(
    session: &Session<S>,
    config: &ItineraryConfig,
    criteria: &FilterCriteria,
    output: Option<&str>,
) -> Result<()> {
    let itinerary = session.itinerary()?;
    let days = config.day_calendar()?;
    let events = criteria.apply(&itinerary.schedule);

    let ics = CalendarExporter::new(&days, &itinerary.brokers)
        .with_prodid(&config.prodid)
        .with_default_location(&config.default_location)
        .export(events.iter().copied());

    if output == Some("-") {
        print!("{ics}");
        return Ok(());
    }

    let path = match output {
        Some(path) => PathBuf::from(path),
        None => PathBuf::from(export_filename(&config.export_prefix, criteria.day.as_deref())),
    };
    std::fs::write(&path, &ics).with_context(|| format!("Could not write {}", path.display()))?;

    let exported = exportable_count(events.iter().copied());
    println!(
        "{} {} {} to {}",
        "Exported".green(),
        exported,
        pluralize("event", exported),
        path.display()
    );
    if exported < events.len() {
        println!(
            "{}",
            format!("{} without a start time skipped", events.len() - exported).dimmed()
        );
    }

    Ok(())
}
