//! Calendar interchange (.ics) export.
//!
//! Documents are built with the icalendar crate, which handles CRLF line
//! endings, TEXT escaping and line folding.

mod generate;

pub use generate::{CalendarExporter, export_filename, exportable_count, format_timestamp};
