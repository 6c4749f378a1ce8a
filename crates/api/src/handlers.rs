/// Booking, lookup and cancellation of single appointments
pub mod appointment;
/// Free slots and bookable dates
pub mod availability;
/// Doctor directory pages
pub mod doctor;
