//! Itinerary configuration at ~/.config/expo-itinerary/config.toml

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_EXPORT_PREFIX, DEFAULT_LOCATION, DEFAULT_PRODID, DEFAULT_SLOT_END, DEFAULT_SLOT_START,
};
use crate::days::{ConferenceDay, DayCalendar, default_days};
use crate::error::{ItineraryError, ItineraryResult};
use crate::time::{ClockTime, half_hour_slots, parse_clock_time};

static DEFAULT_DATASET_PATH: &str = "~/expo/itinerary_data.json";
static DEFAULT_STATE_DIR: &str = "~/.local/share/expo-itinerary";

fn default_dataset_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATASET_PATH)
}

fn default_state_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("expo-itinerary"))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR))
}

fn default_slot_start() -> String {
    DEFAULT_SLOT_START.to_string()
}

fn default_slot_end() -> String {
    DEFAULT_SLOT_END.to_string()
}

fn default_prodid() -> String {
    DEFAULT_PRODID.to_string()
}

fn default_location() -> String {
    DEFAULT_LOCATION.to_string()
}

fn default_export_prefix() -> String {
    DEFAULT_EXPORT_PREFIX.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItineraryConfig {
    /// JSON dataset the viewer renders.
    #[serde(default = "default_dataset_path")]
    pub dataset: PathBuf,

    /// Where assignments and notes are persisted.
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,

    /// Day label → calendar date, in conference order.
    #[serde(default = "default_days")]
    pub days: Vec<ConferenceDay>,

    #[serde(default = "default_slot_start")]
    pub slot_start: String,

    #[serde(default = "default_slot_end")]
    pub slot_end: String,

    #[serde(default = "default_prodid")]
    pub prodid: String,

    #[serde(default = "default_location")]
    pub default_location: String,

    #[serde(default = "default_export_prefix")]
    pub export_prefix: String,
}

impl Default for ItineraryConfig {
    fn default() -> Self {
        ItineraryConfig {
            dataset: default_dataset_path(),
            state_dir: default_state_dir(),
            days: default_days(),
            slot_start: default_slot_start(),
            slot_end: default_slot_end(),
            prodid: default_prodid(),
            default_location: default_location(),
            export_prefix: default_export_prefix(),
        }
    }
}

impl ItineraryConfig {
    pub fn config_path() -> ItineraryResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ItineraryError::Config("Could not determine config directory".into()))?
            .join("expo-itinerary");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, creating a commented config file on first run.
    pub fn load() -> ItineraryResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path`, with `ITINERARY_*` environment variables taking precedence.
    pub fn load_from(path: &Path) -> ItineraryResult<Self> {
        let config: ItineraryConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("ITINERARY"))
            .build()
            .map_err(|e| ItineraryError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ItineraryError::Config(e.to_string()))?;

        // Surface a bad day table or slot window at load time
        config.day_calendar()?;
        config.slot_window()?;

        Ok(config)
    }

    pub fn dataset_path(&self) -> PathBuf {
        expand(&self.dataset)
    }

    pub fn state_path(&self) -> PathBuf {
        expand(&self.state_dir)
    }

    pub fn day_calendar(&self) -> ItineraryResult<DayCalendar> {
        DayCalendar::new(self.days.clone())
    }

    fn slot_window(&self) -> ItineraryResult<(ClockTime, ClockTime)> {
        let parse = |label: &str| {
            parse_clock_time(label)
                .map_err(|e| ItineraryError::Config(format!("Invalid slot time '{label}': {e}")))
        };
        Ok((parse(&self.slot_start)?, parse(&self.slot_end)?))
    }

    /// Half-hour grid slots between `slot_start` and `slot_end`.
    pub fn slot_labels(&self) -> ItineraryResult<Vec<String>> {
        let (start, end) = self.slot_window()?;
        Ok(half_hour_slots(start, end)
            .iter()
            .map(ToString::to_string)
            .collect())
    }

    /// Write a default config file with every option commented out.
    pub fn create_default_config(path: &Path) -> ItineraryResult<()> {
        let contents = format!(
            "\
# expo-itinerary configuration

# Itinerary dataset (JSON):
# dataset = \"{DEFAULT_DATASET_PATH}\"

# Where assignments and company notes are kept:
# state_dir = \"{DEFAULT_STATE_DIR}\"

# Conference days, in order. Unknown day labels fall back to the first entry.
# [[days]]
# label = \"monday\"
# date = \"2026-02-02\"
#
# [[days]]
# label = \"tuesday\"
# date = \"2026-02-03\"

# Calendar grid window:
# slot_start = \"{DEFAULT_SLOT_START}\"
# slot_end = \"{DEFAULT_SLOT_END}\"

# Calendar export:
# prodid = \"{DEFAULT_PRODID}\"
# default_location = \"{DEFAULT_LOCATION}\"
# export_prefix = \"{DEFAULT_EXPORT_PREFIX}\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ItineraryError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| ItineraryError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}
