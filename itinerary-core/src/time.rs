//! Parsing of free-form 12-hour time labels.
//!
//! Schedule times arrive as display strings such as `"9:30 AM"`, `"10:00am-10:30am PST"`
//! or the unscheduled marker `"TBD"`. Only the first `H:MM AM/PM` token is read.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use thiserror::Error;

use crate::constants::{UNSCHEDULED_LABEL, UNSCHEDULED_SORT_KEY};

const MINUTES_PER_DAY: u16 = 24 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    pub fn as_str(&self) -> &'static str {
        match self {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        }
    }
}

/// Why a time label could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    #[error("time is unscheduled")]
    Unscheduled,

    #[error("no 12-hour time found in '{0}'")]
    NoTimeToken(String),

    #[error("time {hour}:{minute:02} is out of range")]
    OutOfRange { hour: u8, minute: u8 },
}

/// A validated wall-clock time on the 12-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
    meridiem: Meridiem,
}

impl ClockTime {
    pub fn new(hour: u8, minute: u8, meridiem: Meridiem) -> Result<Self, TimeParseError> {
        if !(1..=12).contains(&hour) || minute > 59 {
            return Err(TimeParseError::OutOfRange { hour, minute });
        }
        Ok(ClockTime {
            hour,
            minute,
            meridiem,
        })
    }

    /// Build from minutes since midnight. Returns None past the end of the day.
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        if minutes >= MINUTES_PER_DAY {
            return None;
        }
        let hour24 = (minutes / 60) as u8;
        let meridiem = if hour24 < 12 { Meridiem::Am } else { Meridiem::Pm };
        let hour = match hour24 % 12 {
            0 => 12,
            h => h,
        };
        Some(ClockTime {
            hour,
            minute: (minutes % 60) as u8,
            meridiem,
        })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn meridiem(&self) -> Meridiem {
        self.meridiem
    }

    /// Hour on the 24-hour clock (12 AM is 0, 12 PM is 12).
    pub fn hour24(&self) -> u8 {
        match (self.meridiem, self.hour) {
            (Meridiem::Am, 12) => 0,
            (Meridiem::Am, h) => h,
            (Meridiem::Pm, 12) => 12,
            (Meridiem::Pm, h) => h + 12,
        }
    }

    pub fn minutes_since_midnight(&self) -> u16 {
        u16::from(self.hour24()) * 60 + u16::from(self.minute)
    }

    pub fn to_naive_time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(u32::from(self.hour24()), u32::from(self.minute), 0)
    }
}

impl Ord for ClockTime {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.minutes_since_midnight()
            .cmp(&other.minutes_since_midnight())
    }
}

impl PartialOrd for ClockTime {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Canonical `H:MM AM` form, used for slot matching and display.
impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}:{:02} {}",
            self.hour,
            self.minute,
            self.meridiem.as_str()
        )
    }
}

impl FromStr for ClockTime {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_clock_time(s)
    }
}

/// Parse the first `H:MM AM/PM` token found in `display`.
///
/// The meridiem is case-insensitive and may follow the minutes with or without
/// whitespace. Anything around the token (a weekday, a trailing end time, a
/// timezone abbreviation) is ignored.
pub fn parse_clock_time(display: &str) -> Result<ClockTime, TimeParseError> {
    let trimmed = display.trim();
    if trimmed.eq_ignore_ascii_case(UNSCHEDULED_LABEL) {
        return Err(TimeParseError::Unscheduled);
    }

    let bytes = trimmed.as_bytes();
    for start in 0..bytes.len() {
        if let Some((hour, minute, meridiem)) = match_time_token(&bytes[start..]) {
            return ClockTime::new(hour, minute, meridiem);
        }
    }

    Err(TimeParseError::NoTimeToken(trimmed.to_string()))
}

/// Minutes since midnight, or `UNSCHEDULED_SORT_KEY` when the label has no valid time.
pub fn parse_time_to_minutes(display: &str) -> u16 {
    parse_clock_time(display)
        .map(|time| time.minutes_since_midnight())
        .unwrap_or(UNSCHEDULED_SORT_KEY)
}

/// Every half hour from `start` through `end`, inclusive.
pub fn half_hour_slots(start: ClockTime, end: ClockTime) -> Vec<ClockTime> {
    (start.minutes_since_midnight()..=end.minutes_since_midnight())
        .step_by(30)
        .filter_map(ClockTime::from_minutes)
        .collect()
}

fn match_time_token(input: &[u8]) -> Option<(u8, u8, Meridiem)> {
    // Two hour digits are tried before one, so "10:00" is never read as "0:00".
    [2, 1]
        .into_iter()
        .find_map(|hour_len| match_with_hour_len(input, hour_len))
}

fn match_with_hour_len(input: &[u8], hour_len: usize) -> Option<(u8, u8, Meridiem)> {
    let hour_digits = input.get(..hour_len)?;
    if !hour_digits.iter().all(u8::is_ascii_digit) {
        return None;
    }

    let rest = &input[hour_len..];
    let (&colon, rest) = rest.split_first()?;
    if colon != b':' {
        return None;
    }

    let minute_digits = rest.get(..2)?;
    if !minute_digits.iter().all(u8::is_ascii_digit) {
        return None;
    }

    let mut rest = &rest[2..];
    while let Some((first, tail)) = rest.split_first() {
        if !first.is_ascii_whitespace() {
            break;
        }
        rest = tail;
    }

    let meridiem = match rest.get(..2)? {
        [marker, m] if m.eq_ignore_ascii_case(&b'm') => match marker.to_ascii_lowercase() {
            b'a' => Meridiem::Am,
            b'p' => Meridiem::Pm,
            _ => return None,
        },
        _ => return None,
    };

    Some((digits_value(hour_digits), digits_value(minute_digits), meridiem))
}

fn digits_value(digits: &[u8]) -> u8 {
    digits.iter().fold(0, |acc, d| acc * 10 + (d - b'0'))
}
