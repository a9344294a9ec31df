//! Error types for the itinerary core.

use thiserror::Error;

/// Errors that can occur in itinerary operations.
#[derive(Error, Debug)]
pub enum ItineraryError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not read dataset at {path}: {reason}")]
    DatasetFetch { path: String, reason: String },

    #[error("Dataset parse error: {0}")]
    DatasetParse(String),

    #[error("Itinerary data has not been loaded yet")]
    NotReady,

    #[error("Itinerary data is unavailable: {0}")]
    Unavailable(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for itinerary operations.
pub type ItineraryResult<T> = Result<T, ItineraryError>;
