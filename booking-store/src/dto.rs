//! Data transfer objects for reading and printing bookings.

use serde::{Deserialize, Serialize};

use crate::domain::{Booking, BookingError};

/// Layout used when printing departures.
const DEPARTURE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A booking as it appears in a JSON file.
///
/// Fields are unvalidated text; convert with `Booking::try_from`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDto {
    /// Passenger name
    pub passenger: String,

    /// Departure as `YYYY-MM-DD HH:MM[:SS]`
    pub departure: String,

    /// Airport codes in travel order
    pub itinerary: Vec<String>,
}

impl TryFrom<BookingDto> for Booking {
    type Error = BookingError;

    fn try_from(dto: BookingDto) -> Result<Self, Self::Error> {
        Booking::new(dto.passenger, dto.departure, dto.itinerary)
    }
}

impl From<&Booking> for BookingDto {
    fn from(booking: &Booking) -> Self {
        Self {
            passenger: booking.passenger().to_string(),
            departure: booking.departure().format(DEPARTURE_FORMAT).to_string(),
            itinerary: booking
                .itinerary()
                .iter()
                .map(|code| code.as_str().to_string())
                .collect(),
        }
    }
}

/// Parse a JSON array of bookings.
pub fn parse_bookings(json: &str) -> Result<Vec<BookingDto>, serde_json::Error> {
    serde_json::from_str(json)
}
