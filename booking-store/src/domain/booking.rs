//! Booking records.
//!
//! A `Booking` can only be obtained through [`Booking::new`] or
//! [`Booking::from_codes`], both of which validate every field. Once built,
//! a booking never changes, so the store can trust any value it is handed.

use std::fmt;

use chrono::NaiveDateTime;
use tracing::debug;

use super::{AirportCode, BookingError, Departure};

/// An airline booking: who flies, when, and through which airports.
///
/// # Invariants
///
/// - Passenger name is not empty
/// - Itinerary has at least one airport
/// - No airport directly follows itself in the itinerary
///
/// Equality is structural over all three fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Booking {
    passenger: String,
    departure: NaiveDateTime,
    itinerary: Vec<AirportCode>,
}

impl Booking {
    /// Validate the inputs and build a booking.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if:
    /// - `passenger` is empty
    /// - `departure` is not a valid timestamp
    /// - `itinerary` is empty, or an entry is not exactly 3 alphabetic characters
    /// - two consecutive itinerary entries are the same airport
    ///
    /// # Examples
    ///
    /// ```
    /// use booking_store::domain::Booking;
    ///
    /// let booking = Booking::new("Alice", "2024-09-19 06:45", ["LHR", "AMS", "JFK"]).unwrap();
    /// assert_eq!(booking.passenger(), "Alice");
    /// assert_eq!(booking.itinerary().len(), 3);
    ///
    /// // Consecutive duplicates are rejected
    /// assert!(Booking::new("Alice", "2024-09-19 06:45", ["LHR", "LHR"]).is_err());
    ///
    /// // So is an empty itinerary
    /// assert!(Booking::new("Alice", "2024-09-19 06:45", Vec::<&str>::new()).is_err());
    /// ```
    pub fn new<D, I>(
        passenger: impl Into<String>,
        departure: D,
        itinerary: I,
    ) -> Result<Self, BookingError>
    where
        D: Departure,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let passenger = passenger.into();
        check_passenger(&passenger)?;

        let departure = departure.into_departure().inspect_err(|e| {
            debug!(passenger = %passenger, error = %e, "Rejected booking departure");
        })?;

        let itinerary = itinerary
            .into_iter()
            .map(|code| AirportCode::parse(code.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                debug!(passenger = %passenger, error = %e, "Rejected booking itinerary");
                BookingError::invalid(format!(
                    "itinerary must be a list of 3-letter airport codes, e.g. 'JFK', 'LHR' ({e})"
                ))
            })?;

        Self::from_codes(passenger, departure, itinerary)
    }

    /// Build a booking from already-parsed airport codes.
    ///
    /// Applies the same name and itinerary checks as [`Booking::new`].
    pub fn from_codes(
        passenger: impl Into<String>,
        departure: NaiveDateTime,
        itinerary: Vec<AirportCode>,
    ) -> Result<Self, BookingError> {
        let passenger = passenger.into();
        check_passenger(&passenger)?;
        check_itinerary(&itinerary).inspect_err(|e| {
            debug!(passenger = %passenger, error = %e, "Rejected booking itinerary");
        })?;

        debug!(
            passenger = %passenger,
            departure = %departure,
            stops = itinerary.len(),
            "Booking created"
        );

        Ok(Self {
            passenger,
            departure,
            itinerary,
        })
    }

    /// Returns the passenger name.
    pub fn passenger(&self) -> &str {
        &self.passenger
    }

    /// Returns the departure timestamp.
    pub fn departure(&self) -> NaiveDateTime {
        self.departure
    }

    /// Returns the airports in travel order.
    pub fn itinerary(&self) -> &[AirportCode] {
        &self.itinerary
    }

    /// First airport of the itinerary.
    pub fn origin(&self) -> AirportCode {
        self.itinerary[0]
    }

    /// Last airport of the itinerary.
    pub fn final_destination(&self) -> AirportCode {
        self.itinerary[self.itinerary.len() - 1]
    }

    /// Iterate adjacent `(from, to)` hops.
    ///
    /// A single-airport itinerary has no hops.
    pub fn legs(&self) -> impl Iterator<Item = (AirportCode, AirportCode)> + '_ {
        self.itinerary.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Returns true if `origin` is immediately followed by `destination`
    /// somewhere in the itinerary.
    pub fn has_leg(&self, origin: AirportCode, destination: AirportCode) -> bool {
        self.legs().any(|leg| leg == (origin, destination))
    }
}

impl fmt::Display for Booking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Booking({}, {}, ", self.passenger, self.departure)?;
        for (i, code) in self.itinerary.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{code}")?;
        }
        f.write_str(")")
    }
}

fn check_passenger(passenger: &str) -> Result<(), BookingError> {
    if passenger.is_empty() {
        debug!("Rejected booking with empty passenger name");
        return Err(BookingError::invalid("passenger name cannot be empty"));
    }
    Ok(())
}

fn check_itinerary(itinerary: &[AirportCode]) -> Result<(), BookingError> {
    if itinerary.is_empty() {
        return Err(BookingError::invalid(
            "itinerary must contain at least one airport code",
        ));
    }

    if let Some(pair) = itinerary.windows(2).find(|pair| pair[0] == pair[1]) {
        return Err(BookingError::invalid(format!(
            "consecutive duplicate airport {} in itinerary",
            pair[0]
        )));
    }

    Ok(())
}
