use anyhow::Result;
use itinerary_core::session::Session;
use itinerary_core::store::KeyValueStore;
use itinerary_core::summary::CoverageReport;
use owo_colors::OwoColorize;

use crate::render::swatch;

pub fn run<S: KeyValueStore>(session: &Session<S>) -> Result<()> {
    let itinerary = session.itinerary()?;
    let report = CoverageReport::build(&itinerary.schedule);

    for coverage in &report.companies {
        let brokers: Vec<String> = coverage
            .brokers
            .iter()
            .map(|id| match itinerary.broker(id) {
                Some(broker) => swatch(&broker.color, &broker.name),
                None => id.to_string(),
            })
            .collect();
        let padded = format!("{:<6}", coverage.ticker);
        let ticker = if coverage.brokers.len() > 1 {
            padded.yellow().bold().to_string()
        } else {
            padded.bold().to_string()
        };
        println!(
            "{} {} {}",
            ticker,
            coverage.company.dimmed(),
            brokers.join(", ")
        );
    }

    println!();
    println!(
        "{} companies · {} exclusive · {} shared · {} broker meetings",
        report.companies.len(),
        report.exclusive,
        report.multiple.yellow(),
        report.total_meetings
    );
    for broker in &itinerary.brokers {
        println!(
            "   {} {}",
            swatch(&broker.color, &broker.name),
            report.broker_count(&broker.id).dimmed()
        );
    }

    Ok(())
}
