//! Deadline and time-of-day handling.
//!
//! The optimizer reasons in fractional hours since midnight on the deadline's
//! date (e.g. 8.5 is 08:30). This module converts between those and chrono
//! types, and parses the "YYYY-MM-DD" / "HH:MM" strings that come in from the
//! HTTP layer.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::fmt;

/// Error returned when parsing an invalid date or time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date or time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Seconds in one hour.
pub const SECS_PER_HOUR: i64 = 3600;

/// Parse a time of day from strict "HH:MM" format.
///
/// # Examples
///
/// ```
/// use departure_planner::domain::parse_hhmm;
///
/// assert!(parse_hhmm("00:00").is_ok());
/// assert!(parse_hhmm("23:59").is_ok());
///
/// assert!(parse_hhmm("1430").is_err());
/// assert!(parse_hhmm("14:3").is_err());
/// assert!(parse_hhmm("24:00").is_err());
/// ```
pub fn parse_hhmm(s: &str) -> Result<NaiveTime, TimeError> {
    if s.len() != 5 {
        return Err(TimeError::new("expected HH:MM format"));
    }

    let bytes = s.as_bytes();
    if bytes[2] != b':' {
        return Err(TimeError::new("expected colon at position 2"));
    }

    let hour =
        parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
    if hour > 23 {
        return Err(TimeError::new("hour must be 0-23"));
    }

    let minute =
        parse_two_digits(&bytes[3..5]).ok_or_else(|| TimeError::new("invalid minute digits"))?;
    if minute > 59 {
        return Err(TimeError::new("minute must be 0-59"));
    }

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| TimeError::new("invalid time"))
}

/// Parse a calendar date from "YYYY-MM-DD" format.
pub fn parse_date(s: &str) -> Result<NaiveDate, TimeError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| TimeError::new("expected YYYY-MM-DD"))
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

/// Fractional hours since midnight, to whole-second precision.
pub fn fractional_hour(time: NaiveTime) -> f64 {
    time.num_seconds_from_midnight() as f64 / SECS_PER_HOUR as f64
}

/// Format a fractional hour as "HH:MM", truncating to the whole minute.
///
/// The value is first snapped to the nearest second so that hours produced
/// from exact second counts (e.g. 8.0833… for 08:05) do not truncate down a
/// minute due to floating-point error.
///
/// ```
/// use departure_planner::domain::format_hour;
///
/// assert_eq!(format_hour(8.5), "08:30");
/// assert_eq!(format_hour(29_100.0 / 3600.0), "08:05");
/// assert_eq!(format_hour(8.0 + 119.0 / 3600.0), "08:01");
/// ```
pub fn format_hour(hour: f64) -> String {
    let secs = (hour * SECS_PER_HOUR as f64).round() as i64;
    let mins = secs.div_euclid(60);
    format!("{:02}:{:02}", mins / 60, mins % 60)
}

/// The moment by which the traveler must arrive.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Deadline {
    at: NaiveDateTime,
}

impl Deadline {
    pub fn new(at: NaiveDateTime) -> Self {
        Self { at }
    }

    /// Parse a deadline from separate "YYYY-MM-DD" and "HH:MM" strings.
    pub fn parse(date: &str, time: &str) -> Result<Self, TimeError> {
        let date = parse_date(date.trim())?;
        let time = parse_hhmm(time.trim())?;
        Ok(Self::new(date.and_time(time)))
    }

    pub fn at(&self) -> NaiveDateTime {
        self.at
    }

    pub fn date(&self) -> NaiveDate {
        self.at.date()
    }

    /// The deadline as fractional hours since midnight on its own date.
    pub fn hour(&self) -> f64 {
        fractional_hour(self.at.time())
    }

    /// Seconds since midnight on the deadline's date.
    pub fn secs_from_midnight(&self) -> i64 {
        i64::from(self.at.time().num_seconds_from_midnight())
    }

    /// Whether the deadline has already passed at `now`.
    pub fn is_before(&self, now: NaiveDateTime) -> bool {
        self.at < now
    }

    /// "Weekday, YYYY-MM-DD", e.g. "Friday, 2024-03-15".
    pub fn display_date(&self) -> String {
        self.at.format("%A, %Y-%m-%d").to_string()
    }

    /// The deadline's time of day as "HH:MM".
    pub fn time_hhmm(&self) -> String {
        self.at.format("%H:%M").to_string()
    }
}

impl fmt::Debug for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deadline({})", self.at.format("%Y-%m-%d %H:%M"))
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.at.format("%Y-%m-%d %H:%M"))
    }
}
