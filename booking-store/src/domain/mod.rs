//! Domain types for airline bookings.
//!
//! This module contains the validated record types. All types enforce their
//! invariants at construction time, so code that receives them (the booking
//! store in particular) never has to re-check.

mod airport;
mod booking;
mod error;
mod time;

pub use airport::{AirportCode, InvalidAirportCode};
pub use booking::Booking;
pub use error::BookingError;
pub use time::{Departure, departure_at, parse_departure};
