//! Date-key parsing and day label formatting.

use std::fmt;

use chrono::{DateTime, Datelike, Utc};

/// Weekday names indexed from Sunday.
pub const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tues", "Wed", "Thurs", "Fri", "Sat"];

/// Largest representable offset from the epoch, in milliseconds (100 million days).
const MAX_EPOCH_MILLIS: i64 = 8_640_000_000_000_000;

/// Parse a date key into a UTC timestamp.
///
/// The key is read as an integer count of milliseconds since the Unix epoch.
/// Leading whitespace and a sign are accepted, and anything after the leading
/// run of digits is ignored, so `"1609459200000.0"` still parses. Returns
/// `None` when there are no digits or the value is out of calendar range.
pub fn parse_date_key(key: &str) -> Option<DateTime<Utc>> {
    let trimmed = key.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    let digits = &rest[..digits_end];
    if digits.is_empty() {
        return None;
    }

    let magnitude: i64 = digits.parse().ok()?;
    if magnitude > MAX_EPOCH_MILLIS {
        return None;
    }
    let millis = if negative { -magnitude } else { magnitude };

    DateTime::<Utc>::from_timestamp_millis(millis)
}

pub fn weekday_name(date: &DateTime<Utc>) -> &'static str {
    WEEKDAYS[date.weekday().num_days_from_sunday() as usize]
}

/// Label shown above a day's metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayLabel {
    pub weekday: Option<&'static str>,
    /// e.g. `Jan 1`
    pub month_day: Option<String>,
}

impl DayLabel {
    pub fn from_key(key: &str) -> Self {
        match parse_date_key(key) {
            Some(date) => Self {
                weekday: Some(weekday_name(&date)),
                month_day: Some(format!("{} {}", date.format("%b"), date.day())),
            },
            None => Self { weekday: None, month_day: None },
        }
    }

    pub fn is_parsed(&self) -> bool {
        self.weekday.is_some()
    }

    /// Text after the `Date:` caption.
    pub fn value_text(&self) -> String {
        match (self.weekday, &self.month_day) {
            (Some(weekday), Some(month_day)) => format!("{weekday}, {month_day}"),
            _ => String::new(),
        }
    }
}

impl fmt::Display for DayLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Date: {}", self.value_text())
    }
}
