pub mod assign;
pub mod companies;
pub mod coverage;
pub mod export;
pub mod grid;
pub mod next;
pub mod note;
pub mod summary;
pub mod timeline;

use anyhow::Result;
use itinerary_core::Itinerary;

/// Bail with the list of valid ids when `id` is not a team member.
pub fn require_team_member(itinerary: &Itinerary, id: &str) -> Result<()> {
    if itinerary.team_member(id).is_none() {
        let available: Vec<&str> = itinerary.conestoga_team.iter().map(|m| m.id.as_str()).collect();
        anyhow::bail!(
            "Team member '{}' not found. Available: {}",
            id,
            available.join(", ")
        );
    }
    Ok(())
}
