use anyhow::Result;
use itinerary_core::session::Session;
use itinerary_core::store::KeyValueStore;
use owo_colors::OwoColorize;

pub fn run<S: KeyValueStore>(session: &mut Session<S>, ticker: &str, text: &str) -> Result<()> {
    let itinerary = session.itinerary()?;
    if itinerary.company(ticker).is_none() {
        tracing::warn!(ticker, "note saved for a ticker not in the company list");
    }

    session.set_note(ticker, text)?;

    if text.trim().is_empty() {
        println!("{} {}", "Cleared note for".dimmed(), ticker.bold());
    } else {
        println!("{} {}", "Saved note for".green(), ticker.bold());
    }
    Ok(())
}
