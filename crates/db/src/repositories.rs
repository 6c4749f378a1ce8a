/// Appointments in the application database.
pub mod appointment;
/// Doctor working hours read from Khanza's `jadwal` table.
pub mod schedule;
