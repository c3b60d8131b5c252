//! Airline booking store.
//!
//! Keeps validated booking records in departure order and answers two
//! questions: "which bookings depart before this time?" and "which bookings
//! fly this origin directly to this destination?".

pub mod cli;
pub mod domain;
pub mod dto;
pub mod store;
