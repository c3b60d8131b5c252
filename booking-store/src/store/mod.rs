//! Booking store.
//!
//! Holds validated bookings in departure order and answers the two queries
//! the system supports: "what departs before this time?" and "who flies
//! this origin directly to this destination?".

mod bookings;
mod shared;

pub use bookings::BookingStore;
pub use shared::SharedBookingStore;
