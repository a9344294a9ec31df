//! Broker and team member pages.

use anyhow::Result;
use itinerary_core::projection::{by_assignee, by_broker, group_by_entity};
use itinerary_core::session::Session;
use itinerary_core::store::KeyValueStore;
use itinerary_core::summary::{BrokerSummary, MemberSummary};
use owo_colors::OwoColorize;

use super::require_team_member;
use crate::render::{Render, pluralize, swatch, truncated_list};

pub fn brokers<S: KeyValueStore>(session: &Session<S>) -> Result<()> {
    let itinerary = session.itinerary()?;
    let groups = group_by_entity(&itinerary.schedule, by_broker);

    for broker in &itinerary.brokers {
        let count = groups
            .iter()
            .find(|g| g.key == broker.id)
            .map(|g| g.event_count())
            .unwrap_or(0);
        println!(
            "{} {} {}",
            swatch(&broker.color, "●"),
            broker.display_name().bold(),
            format!("{} · {} {}", broker.id, count, pluralize("meeting", count)).dimmed()
        );
    }

    // Events whose broker id is missing from the broker table
    for group in groups.iter().filter(|g| itinerary.broker(g.key).is_none()) {
        let count = group.event_count();
        println!(
            "  {} {}",
            group.key,
            format!("{} {} (unknown broker)", count, pluralize("meeting", count)).dimmed()
        );
    }

    Ok(())
}

pub fn broker<S: KeyValueStore>(session: &Session<S>, id: &str) -> Result<()> {
    let itinerary = session.itinerary()?;
    if itinerary.broker(id).is_none() && !itinerary.schedule.iter().any(|e| e.broker == id) {
        let available: Vec<&str> = itinerary.brokers.iter().map(|b| b.id.as_str()).collect();
        anyhow::bail!("Broker '{}' not found. Available: {}", id, available.join(", "));
    }

    let summary = BrokerSummary::build(itinerary, id);
    let name = match summary.broker {
        Some(broker) => swatch(&broker.color, summary.display_name()),
        None => summary.display_name().to_string(),
    };
    println!("{}", name.bold());
    println!(
        "   {} {} · {} {} · {} assigned · team of {}",
        summary.total_events,
        pluralize("meeting", summary.total_events),
        summary.companies.len(),
        if summary.companies.len() == 1 { "company" } else { "companies" },
        summary.assigned,
        summary.team_size
    );
    if !summary.companies.is_empty() {
        println!("   {}", truncated_list(&summary.companies, 12).dimmed());
    }

    if let Some(broker) = summary.broker {
        if !broker.analysts.is_empty() {
            println!("   {} {}", "Analysts:".dimmed(), broker.analysts.join(", "));
        }
        for contact in &broker.team {
            if contact.role.is_empty() {
                println!("   {}", contact.name);
            } else {
                println!("   {} {}", contact.name, format!("({})", contact.role).dimmed());
            }
        }
        if let Some(insights) = &broker.insights {
            println!("   {}", insights.to_string().italic());
        }
    }

    for day in &summary.days {
        println!();
        println!("{}", day.render(itinerary));
    }

    Ok(())
}

pub fn team<S: KeyValueStore>(session: &Session<S>) -> Result<()> {
    let itinerary = session.itinerary()?;
    let groups = group_by_entity(&itinerary.schedule, by_assignee);

    for member in &itinerary.conestoga_team {
        let count = groups
            .iter()
            .find(|g| g.key == member.id)
            .map(|g| g.event_count())
            .unwrap_or(0);
        println!(
            "{} {}",
            member.name.bold(),
            format!("{} · {} {}", member.id, count, pluralize("meeting", count)).dimmed()
        );
    }

    let unassigned = itinerary
        .schedule
        .iter()
        .filter(|e| e.assigned_to.is_none())
        .count();
    if unassigned > 0 {
        println!();
        println!(
            "{}",
            format!("{} {} unassigned", unassigned, pluralize("meeting", unassigned)).yellow()
        );
    }

    Ok(())
}

pub fn member<S: KeyValueStore>(session: &Session<S>, id: &str) -> Result<()> {
    let itinerary = session.itinerary()?;
    require_team_member(itinerary, id)?;

    let summary = MemberSummary::build(itinerary, id);
    println!("{}", summary.display_name().bold());
    println!(
        "   {} {} · {} {}",
        summary.total_events,
        pluralize("meeting", summary.total_events),
        summary.brokers.len(),
        pluralize("broker", summary.brokers.len())
    );
    if !summary.companies.is_empty() {
        println!("   {}", truncated_list(&summary.companies, 12).dimmed());
    }

    if summary.days.is_empty() {
        println!("   {}", "Nothing assigned yet".dimmed());
    }
    for day in &summary.days {
        println!();
        println!("{}", day.render(itinerary));
    }

    Ok(())
}
