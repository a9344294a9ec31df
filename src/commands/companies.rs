//! Company directory and profile pages.

use anyhow::Result;
use itinerary_core::projection::group_by_day_chronological;
use itinerary_core::{Itinerary, ScheduleEvent};
use itinerary_core::session::Session;
use itinerary_core::store::KeyValueStore;
use itinerary_core::summary::company_directory;
use owo_colors::OwoColorize;

use crate::render::{Render, pluralize};

pub fn list<S: KeyValueStore>(session: &Session<S>) -> Result<()> {
    let itinerary = session.itinerary()?;

    for entry in company_directory(itinerary, session.notes()) {
        let company = entry.company;
        let note_flag = if entry.has_notes { "✎" } else { " " };
        println!(
            "{} {} {} {}",
            format!("{:<6}", company.ticker).bold(),
            note_flag.cyan(),
            company.name,
            format!(
                "{} {}{}",
                entry.meetings,
                pluralize("meeting", entry.meetings),
                if company.segment.is_empty() {
                    String::new()
                } else {
                    format!(" · {}", company.segment)
                }
            )
            .dimmed()
        );
    }

    Ok(())
}

pub fn show<S: KeyValueStore>(session: &Session<S>, ticker: &str) -> Result<()> {
    let itinerary = session.itinerary()?;
    let events: Vec<_> = itinerary
        .schedule
        .iter()
        .filter(|e| e.ticker == ticker)
        .collect();

    let Some(company) = itinerary.company(ticker) else {
        if events.is_empty() {
            anyhow::bail!("Company '{}' not found", ticker);
        }
        // Scheduled but missing from the directory
        println!("{}", ticker.bold());
        print_meetings(itinerary, events);
        return Ok(());
    };

    println!("{} {}", company.ticker.bold(), company.name);
    let facts: Vec<String> = [
        ("Booth", &company.booth),
        ("Segment", &company.segment),
        ("Position", &company.stack_position),
        ("Market cap", &company.market_cap),
    ]
    .into_iter()
    .filter(|(_, value)| !value.is_empty())
    .map(|(label, value)| format!("{label}: {value}"))
    .collect();
    if !facts.is_empty() {
        println!("   {}", facts.join(" · ").dimmed());
    }
    if !company.tldr.is_empty() {
        println!("   {}", company.tldr);
    }
    if !company.value_prop.is_empty() {
        println!("   {}", company.value_prop.italic());
    }
    if !company.key_products.is_empty() {
        println!("   {} {}", "Products:".dimmed(), company.key_products.join(", "));
    }
    if !company.notes.is_empty() {
        println!("   {}", company.notes.dimmed());
    }

    if let Some(note) = session.note(ticker).filter(|n| !n.is_empty()) {
        println!();
        println!("{} {}", "✎".cyan(), note);
    }

    print_meetings(itinerary, events);
    Ok(())
}

fn print_meetings(itinerary: &Itinerary, events: Vec<&ScheduleEvent>) {
    if events.is_empty() {
        println!("   {}", "No meetings scheduled".dimmed());
        return;
    }
    for day in group_by_day_chronological(events) {
        println!();
        println!("{}", day.render(itinerary));
    }
}
