//! TUI rendering for itinerary types.
//!
//! Extension trait that adds colored terminal rendering to itinerary-core
//! types using owo_colors. Rendering needs the itinerary for name lookups.

use itinerary_core::Itinerary;
use itinerary_core::ScheduleEvent;
use itinerary_core::projection::{DayGroup, SlotGroup};
use owo_colors::OwoColorize;

pub trait Render {
    fn render(&self, itinerary: &Itinerary) -> String;
}

impl Render for ScheduleEvent {
    fn render(&self, itinerary: &Itinerary) -> String {
        let time = format!("{:>9}", self.start_label());
        let broker = itinerary.broker(&self.broker);
        let broker_tag = match broker {
            Some(b) => swatch(&b.color, &b.name),
            None => self.broker.clone(),
        };

        let mut line = format!(
            "{} {} {} {}",
            time.dimmed(),
            self.ticker.bold(),
            self.company,
            format!("({broker_tag})").dimmed()
        );

        let place = if !self.booth.is_empty() {
            Some(format!("Booth {}", self.booth))
        } else {
            self.location.clone()
        };
        if let Some(place) = place {
            line.push_str(&format!(" {}", place.cyan()));
        }

        match self.assigned_to.as_deref() {
            Some(member) => {
                let name = itinerary.team_member_name(member);
                line.push_str(&format!(" {}", format!("→ {name}").green()));
            }
            None => line.push_str(&format!(" {}", "unassigned".yellow())),
        }

        line
    }
}

impl Render for DayGroup<'_> {
    fn render(&self, itinerary: &Itinerary) -> String {
        let mut lines = vec![format!(
            "{} {}",
            day_heading(self.day).bold(),
            format!("({} {})", self.events.len(), pluralize("event", self.events.len())).dimmed()
        )];
        for event in &self.events {
            lines.push(format!("  {} {}", event.render(itinerary), event.id.dimmed()));
            if let Some(notes) = event.notes.as_deref().filter(|n| !n.is_empty()) {
                lines.push(format!("            {}", notes.italic()));
            }
        }
        lines.join("\n")
    }
}

impl Render for SlotGroup<'_> {
    fn render(&self, itinerary: &Itinerary) -> String {
        let mut lines = vec![format!("{:>9}", self.slot.to_string()).bold().to_string()];
        for event in &self.events {
            lines.push(format!("  {}", event.render(itinerary)));
        }
        lines.join("\n")
    }
}

/// "monday" → "Monday"
pub fn day_heading(day: &str) -> String {
    let mut chars = day.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Render `text` in the broker's `#rrggbb` color, or plain when the color is not hex.
pub fn swatch(color: &str, text: &str) -> String {
    match parse_hex_color(color) {
        Some((r, g, b)) => text.truecolor(r, g, b).to_string(),
        None => text.to_string(),
    }
}

fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

/// Join values for display, showing at most `limit` and a "+N" suffix.
pub fn truncated_list(values: &[&str], limit: usize) -> String {
    if values.len() <= limit {
        return values.join(", ");
    }
    format!(
        "{} {}",
        values[..limit].join(", "),
        format!("+{}", values.len() - limit).dimmed()
    )
}
