//! Data-access seams used by the resolver and the API handlers.
//!
//! Implementations return `eyre::Result` like the repositories they wrap; the
//! resolver turns those errors into [`BookingError::UpstreamFailure`].
//!
//! [`BookingError::UpstreamFailure`]: crate::errors::BookingError::UpstreamFailure

use async_trait::async_trait;
use chrono::{NaiveDate, Weekday};
use eyre::Result;
use uuid::Uuid;

use crate::models::{
    appointment::{Appointment, NewAppointment},
    doctor::ScheduleTemplate,
};

/// Read-only view of doctor templates and existing bookings.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Templates for `weekday`, for one doctor or for every doctor when
    /// `doctor_id` is `None`. An unknown doctor yields an empty list.
    async fn doctor_templates(
        &self,
        doctor_id: Option<String>,
        weekday: Weekday,
    ) -> Result<Vec<ScheduleTemplate>>;

    /// Appointments on `date` for one doctor, or all doctors.
    async fn list_appointments(
        &self,
        doctor_id: Option<String>,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>>;
}

/// Writes against the application database's appointment table.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Inserts a pending appointment. Returns `None` when a live appointment
    /// already holds the same (doctor, date, start time).
    async fn create_appointment(&self, appointment: NewAppointment) -> Result<Option<Appointment>>;

    async fn get_appointment(&self, id: Uuid) -> Result<Option<Appointment>>;

    /// Marks a pending or confirmed appointment cancelled. Returns `None` for
    /// an unknown id or one that is already cancelled or completed.
    async fn cancel_appointment(&self, id: Uuid) -> Result<Option<Appointment>>;
}
