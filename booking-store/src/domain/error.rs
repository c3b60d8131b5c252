//! Booking error types.
//!
//! Every failure is a deterministic function of the input, so callers get a
//! distinct kind to branch on and nothing is retried.

use chrono::NaiveDateTime;

use super::InvalidAirportCode;

/// Errors from record validation and store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    /// Malformed name, timestamp, itinerary or route codes
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A structurally identical booking is already stored
    #[error("booking for {passenger} departing {departure} already exists")]
    DuplicateBooking {
        passenger: String,
        departure: NaiveDateTime,
    },
}

impl BookingError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        BookingError::InvalidArgument(message.into())
    }

    /// Returns true for [`BookingError::InvalidArgument`].
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, BookingError::InvalidArgument(_))
    }

    /// Returns true for [`BookingError::DuplicateBooking`].
    pub fn is_duplicate(&self) -> bool {
        matches!(self, BookingError::DuplicateBooking { .. })
    }
}

impl From<InvalidAirportCode> for BookingError {
    fn from(err: InvalidAirportCode) -> Self {
        BookingError::InvalidArgument(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AirportCode;
    use chrono::NaiveDate;

    #[test]
    fn error_display() {
        let err = BookingError::invalid("passenger name cannot be empty");
        assert_eq!(
            err.to_string(),
            "invalid argument: passenger name cannot be empty"
        );

        let departure = NaiveDate::from_ymd_opt(2024, 9, 19)
            .unwrap()
            .and_hms_opt(6, 45, 0)
            .unwrap();
        let err = BookingError::DuplicateBooking {
            passenger: "Alice".into(),
            departure,
        };
        assert_eq!(
            err.to_string(),
            "booking for Alice departing 2024-09-19 06:45:00 already exists"
        );
    }

    #[test]
    fn airport_code_errors_are_invalid_arguments() {
        let err: BookingError = AirportCode::parse("12").unwrap_err().into();
        assert!(err.is_invalid_argument());
        assert!(!err.is_duplicate());
    }
}
