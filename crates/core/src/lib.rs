//! # Booking Core
//!
//! Domain types and the availability computation shared by the database and
//! API crates. Nothing in this crate performs I/O directly: data access goes
//! through the traits in [`store`], which the `booking-db` crate implements.

pub mod availability;
pub mod errors;
pub mod models;
pub mod store;
