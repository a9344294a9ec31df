//! Core of the conference itinerary viewer.
//!
//! - `time` / `days`: reading 12-hour time labels and pinning them to conference dates
//! - `filter` / `projection`: narrowing and regrouping the schedule
//! - `store`: persisted assignments and company notes behind a key-value port
//! - `ics`: calendar export

pub mod constants;
pub mod dataset;
pub mod days;
pub mod error;
pub mod filter;
pub mod ics;
pub mod itinerary_config;
pub mod projection;
pub mod session;
pub mod store;
pub mod summary;
pub mod time;

pub use dataset::{Broker, Company, Itinerary, ScheduleEvent, TeamMember};
pub use error::{ItineraryError, ItineraryResult};
