//! Sorted, duplicate-free booking collection.
//!
//! Bookings are kept in one contiguous `Vec` ordered by departure time.
//! Insertion binary-searches for its slot and shifts the tail, so the
//! collection is never re-sorted, and time queries only need to locate a
//! boundary.

use std::fmt;

use chrono::NaiveDateTime;
use tracing::{debug, trace};

use crate::domain::{AirportCode, Booking, BookingError, Departure};

/// An append-only store of bookings sorted by departure.
///
/// # Invariants
///
/// - Bookings are in non-decreasing departure order
/// - No two stored bookings are structurally equal
///
/// Bookings with the same departure stay in the order they were added.
#[derive(Debug, Clone, Default)]
pub struct BookingStore {
    bookings: Vec<Booking>,
}

impl BookingStore {
    /// Create an empty store.
    pub fn new() -> Self {
        debug!("Booking store initialized empty");
        Self::default()
    }

    /// Create an empty store with room for `capacity` bookings.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bookings: Vec::with_capacity(capacity),
        }
    }

    /// Insert a booking, keeping departure order.
    ///
    /// A booking departing at the same time as stored ones goes after them,
    /// so ties keep insertion order.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateBooking` if a structurally equal booking is already
    /// stored. The store is unchanged on error.
    ///
    /// # Examples
    ///
    /// ```
    /// use booking_store::domain::Booking;
    /// use booking_store::store::BookingStore;
    ///
    /// let mut store = BookingStore::new();
    /// let booking = Booking::new("Alice", "2024-09-19 06:45", ["LHR", "AMS"]).unwrap();
    ///
    /// store.add(booking.clone()).unwrap();
    /// assert!(store.add(booking).unwrap_err().is_duplicate());
    /// assert_eq!(store.len(), 1);
    /// ```
    pub fn add(&mut self, booking: Booking) -> Result<(), BookingError> {
        let departure = booking.departure();
        let (start, end) = self.departure_run(departure);

        // Duplicates share a departure, so only the equal-time run can hold one.
        if self.bookings[start..end].contains(&booking) {
            debug!(
                passenger = %booking.passenger(),
                departure = %departure,
                "Rejected duplicate booking"
            );
            return Err(BookingError::DuplicateBooking {
                passenger: booking.passenger().to_string(),
                departure,
            });
        }

        debug!(
            passenger = %booking.passenger(),
            departure = %departure,
            index = end,
            "Booking added"
        );
        self.bookings.insert(end, booking);
        Ok(())
    }

    /// Validate the inputs into a [`Booking`] and add it.
    ///
    /// Validation and store errors are returned unchanged.
    pub fn create_and_add<D, I>(
        &mut self,
        passenger: impl Into<String>,
        departure: D,
        itinerary: I,
    ) -> Result<(), BookingError>
    where
        D: Departure,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let booking = Booking::new(passenger, departure, itinerary)?;
        self.add(booking)
    }

    /// Bookings departing strictly before `target`, in departure order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `target` is not a valid timestamp.
    ///
    /// # Examples
    ///
    /// ```
    /// use booking_store::store::BookingStore;
    ///
    /// let mut store = BookingStore::new();
    /// store.create_and_add("Alice", "2024-09-19 06:45", ["LHR", "AMS"]).unwrap();
    /// store.create_and_add("Bruce", "2024-09-19 09:30", ["AMS", "JFK"]).unwrap();
    ///
    /// let early = store.search_before("2024-09-19 08:00").unwrap();
    /// assert_eq!(early.len(), 1);
    /// assert_eq!(early[0].passenger(), "Alice");
    /// ```
    pub fn search_before<D: Departure>(&self, target: D) -> Result<&[Booking], BookingError> {
        let target = target.into_departure()?;
        let end = self.bookings.partition_point(|b| b.departure() < target);

        debug!(count = end, target = %target, "Searched bookings departing before");
        Ok(&self.bookings[..end])
    }

    /// Bookings whose itinerary flies `origin` directly to `destination`.
    ///
    /// Results keep departure order and list each booking once, however
    /// many times the hop appears in its itinerary.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if either code is not 3 alphabetic characters, or
    /// if both codes are the same.
    pub fn search_route(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Vec<&Booking>, BookingError> {
        let origin = AirportCode::parse(origin)?;
        let destination = AirportCode::parse(destination)?;
        self.search_route_codes(origin, destination)
    }

    /// Same as [`BookingStore::search_route`] for already-parsed codes.
    pub fn search_route_codes(
        &self,
        origin: AirportCode,
        destination: AirportCode,
    ) -> Result<Vec<&Booking>, BookingError> {
        if origin == destination {
            debug!(%origin, "Rejected route search with identical endpoints");
            return Err(BookingError::invalid(format!(
                "origin and destination must be different (both {origin})"
            )));
        }

        let matches: Vec<&Booking> = self
            .bookings
            .iter()
            .filter(|b| b.has_leg(origin, destination))
            .collect();

        debug!(
            count = matches.len(),
            %origin,
            %destination,
            "Searched bookings by route"
        );
        Ok(matches)
    }

    /// Returns true if a structurally equal booking is stored.
    pub fn contains(&self, booking: &Booking) -> bool {
        let (start, end) = self.departure_run(booking.departure());
        self.bookings[start..end].contains(booking)
    }

    /// All bookings in departure order.
    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    /// Iterate bookings in departure order.
    pub fn iter(&self) -> std::slice::Iter<'_, Booking> {
        self.bookings.iter()
    }

    /// Returns the number of stored bookings.
    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    /// Returns true if nothing has been added.
    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    /// Index range of the bookings departing exactly at `departure`.
    ///
    /// `end` is where a new booking with that departure is inserted.
    fn departure_run(&self, departure: NaiveDateTime) -> (usize, usize) {
        let start = self.bookings.partition_point(|b| b.departure() < departure);
        let len = self.bookings[start..].partition_point(|b| b.departure() == departure);
        trace!(start, len, "Located departure run");
        (start, start + len)
    }
}

impl<'a> IntoIterator for &'a BookingStore {
    type Item = &'a Booking;
    type IntoIter = std::slice::Iter<'a, Booking>;

    fn into_iter(self) -> Self::IntoIter {
        self.bookings.iter()
    }
}

impl fmt::Display for BookingStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BookingStore([")?;
        for (i, booking) in self.bookings.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{booking}")?;
        }
        f.write_str("])")
    }
}

#[cfg(test)]
#[path = "bookings_tests.rs"]
mod tests;
