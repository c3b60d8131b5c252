//! Thread-safe booking store handle.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::{Booking, BookingError, Departure};

use super::BookingStore;

/// A cloneable handle to one [`BookingStore`] behind a single mutex.
///
/// Every operation, reads included, takes the same exclusive lock. Queries
/// return owned bookings because results cannot borrow past the guard.
#[derive(Debug, Clone, Default)]
pub struct SharedBookingStore {
    inner: Arc<Mutex<BookingStore>>,
}

impl SharedBookingStore {
    /// Create a handle to an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing store.
    pub fn from_store(store: BookingStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// See [`BookingStore::add`].
    pub fn add(&self, booking: Booking) -> Result<(), BookingError> {
        self.lock().add(booking)
    }

    /// See [`BookingStore::create_and_add`].
    pub fn create_and_add<D, I>(
        &self,
        passenger: impl Into<String>,
        departure: D,
        itinerary: I,
    ) -> Result<(), BookingError>
    where
        D: Departure,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        // Validate outside the lock.
        let booking = Booking::new(passenger, departure, itinerary)?;
        self.add(booking)
    }

    /// See [`BookingStore::search_before`].
    pub fn search_before<D: Departure>(&self, target: D) -> Result<Vec<Booking>, BookingError> {
        let target = target.into_departure()?;
        Ok(self.lock().search_before(target)?.to_vec())
    }

    /// See [`BookingStore::search_route`].
    pub fn search_route(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Vec<Booking>, BookingError> {
        let guard = self.lock();
        let found = guard.search_route(origin, destination)?;
        Ok(found.into_iter().cloned().collect())
    }

    /// Returns the number of stored bookings.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing has been added.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> BookingStore {
        self.lock().clone()
    }

    // `add` never leaves the store half-updated, so a poisoned lock still
    // guards a consistent store.
    fn lock(&self) -> MutexGuard<'_, BookingStore> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn clones_share_one_store() {
        let store = SharedBookingStore::new();
        let other = store.clone();

        store
            .create_and_add("Alice", "2024-09-19 06:45", ["LHR", "AMS"])
            .unwrap();

        assert_eq!(other.len(), 1);
        assert!(!other.is_empty());
    }

    #[test]
    fn concurrent_adds_keep_invariants() {
        let store = SharedBookingStore::new();

        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let store = store.clone();
                thread::spawn(move || {
                    for i in 0..25u32 {
                        let departure =
                            format!("2024-09-19 {:02}:{:02}", (i * 7) % 24, worker * 5);
                        let passenger = format!("P{worker}-{i}");
                        store
                            .create_and_add(passenger, departure.as_str(), ["LHR", "AMS"])
                            .unwrap();
                        // Every worker also races to add the same shared booking
                        let _ = store.create_and_add("Shared", "2024-09-19 12:00", ["JFK", "CDG"]);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 8 * 25 + 1);
        assert!(
            snapshot
                .bookings()
                .windows(2)
                .all(|w| w[0].departure() <= w[1].departure())
        );
    }

    #[test]
    fn duplicate_surfaces_through_handle() {
        let store = SharedBookingStore::new();
        store
            .create_and_add("Alice", "2024-09-19 06:45", ["LHR"])
            .unwrap();

        let err = store
            .create_and_add("Alice", "2024-09-19 06:45", ["LHR"])
            .unwrap_err();
        assert!(err.is_duplicate());
    }

    #[test]
    fn queries_return_owned_copies() {
        let mut inner = BookingStore::new();
        inner
            .create_and_add("Cindy", "2024-09-18 18:30", ["LHR", "AMS", "JFK"])
            .unwrap();
        inner
            .create_and_add("Alice", "2024-09-19 09:30", ["LHR", "AMS"])
            .unwrap();
        let store = SharedBookingStore::from_store(inner);

        let before = store.search_before("2024-09-19 08:00").unwrap();
        assert_eq!(before.len(), 1);
        assert_eq!(before[0].passenger(), "Cindy");

        let route = store.search_route("LHR", "AMS").unwrap();
        assert_eq!(route.len(), 2);

        assert!(store.search_route("LHR", "LHR").unwrap_err().is_invalid_argument());
        assert!(store.search_before("soon").unwrap_err().is_invalid_argument());
    }
}
