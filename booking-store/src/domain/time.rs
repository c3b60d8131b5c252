//! Departure timestamps.
//!
//! Departures are plain `NaiveDateTime` values: a date and a time of day
//! with no time zone. Anything that should be usable as a departure (a
//! ready-made timestamp, or text from a file or the command line) goes
//! through the [`Departure`] trait, which is where invalid timestamps are
//! rejected.

use chrono::{NaiveDate, NaiveDateTime};

use super::BookingError;

/// Accepted text layouts, tried in order.
const FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// A value that can be turned into a departure timestamp.
///
/// # Examples
///
/// ```
/// use booking_store::domain::Departure;
/// use chrono::NaiveDate;
///
/// let expected = NaiveDate::from_ymd_opt(2024, 9, 19)
///     .unwrap()
///     .and_hms_opt(6, 45, 0)
///     .unwrap();
///
/// assert_eq!("2024-09-19 06:45".into_departure().unwrap(), expected);
/// assert_eq!("2024-09-19T06:45:00".into_departure().unwrap(), expected);
/// assert_eq!(expected.into_departure().unwrap(), expected);
///
/// assert!("19/09/2024 06:45".into_departure().is_err());
/// assert!("2024-02-30 10:00".into_departure().is_err());
/// ```
pub trait Departure {
    /// Convert into a timestamp, failing with `InvalidArgument`.
    fn into_departure(self) -> Result<NaiveDateTime, BookingError>;
}

impl Departure for NaiveDateTime {
    fn into_departure(self) -> Result<NaiveDateTime, BookingError> {
        Ok(self)
    }
}

impl Departure for &NaiveDateTime {
    fn into_departure(self) -> Result<NaiveDateTime, BookingError> {
        Ok(*self)
    }
}

impl Departure for &str {
    fn into_departure(self) -> Result<NaiveDateTime, BookingError> {
        parse_departure(self)
    }
}

impl Departure for &String {
    fn into_departure(self) -> Result<NaiveDateTime, BookingError> {
        parse_departure(self)
    }
}

impl Departure for String {
    fn into_departure(self) -> Result<NaiveDateTime, BookingError> {
        parse_departure(&self)
    }
}

/// Parse a departure timestamp from text.
///
/// Accepts `YYYY-MM-DD HH:MM[:SS]`, with either a space or `T` between the
/// date and the time. Surrounding whitespace is ignored.
pub fn parse_departure(s: &str) -> Result<NaiveDateTime, BookingError> {
    let s = s.trim();

    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .ok_or_else(|| {
            BookingError::invalid(format!(
                "departure time {s:?} is not a valid timestamp (expected YYYY-MM-DD HH:MM[:SS])"
            ))
        })
}

/// Build a timestamp from calendar parts, rejecting impossible dates and times.
pub fn departure_at(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
) -> Result<NaiveDateTime, BookingError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .ok_or_else(|| {
            BookingError::invalid(format!(
                "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02} is not a valid timestamp"
            ))
        })
}
