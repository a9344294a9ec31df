//! Shared constants.

/// Sort key for times that cannot be parsed. Larger than any minute of the day.
pub const UNSCHEDULED_SORT_KEY: u16 = 9999;

/// Display value used by the dataset for events without a start time.
pub const UNSCHEDULED_LABEL: &str = "TBD";

/// Persistence key holding the event → team member map.
pub const ASSIGNMENTS_KEY: &str = "ahr-assignments";

/// Persistence key holding the ticker → note map.
pub const COMPANY_NOTES_KEY: &str = "ahr-company-notes";

pub const DEFAULT_PRODID: &str = "-//AHR Expo 2026//EN";
pub const DEFAULT_LOCATION: &str = "Las Vegas Convention Center";
pub const DEFAULT_EXPORT_PREFIX: &str = "ahr-expo";
pub const DEFAULT_SLOT_START: &str = "8:00 AM";
pub const DEFAULT_SLOT_END: &str = "4:00 PM";
