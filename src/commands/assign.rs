use anyhow::Result;
use itinerary_core::session::Session;
use itinerary_core::store::KeyValueStore;
use owo_colors::OwoColorize;

use super::require_team_member;

pub fn run<S: KeyValueStore>(
    session: &mut Session<S>,
    event_id: &str,
    member: Option<&str>,
) -> Result<()> {
    if let Some(member) = member {
        require_team_member(session.itinerary()?, member)?;
    }

    session.assign(event_id, member)?;

    let itinerary = session.itinerary()?;
    let Some(event) = itinerary.event(event_id) else {
        return Ok(());
    };
    let label = format!("{} {} {}", event.ticker.bold(), event.day, event.start_label());

    match member {
        Some(member) => println!(
            "{} {} → {}",
            "Assigned".green(),
            label,
            itinerary.team_member_name(member)
        ),
        None => println!("{} {}", "Unassigned".yellow(), label),
    }
    Ok(())
}
