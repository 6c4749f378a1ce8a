use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use booking_core::{
    availability::AvailabilityResolver,
    errors::BookingError,
    models::appointment::{Appointment, AppointmentStatus, CreateAppointmentRequest},
};
use chrono::Local;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

/// Books a free slot.
///
/// The slot must be on the doctor's grid and free at the time of the request.
/// Two requests racing for the same slot are settled by the database: the
/// loser gets a 409 as well.
#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    let new = payload.validate()?;

    let now = Local::now().naive_local();
    let resolver = AvailabilityResolver::new(state.schedules.as_ref());
    if !resolver.is_slot_free(&new, now).await? {
        return Err(AppError(BookingError::Conflict(format!(
            "Slot {} {} is not available for doctor {}",
            new.date,
            new.start_time.format("%H:%M"),
            new.doctor_id
        ))));
    }

    let description = format!(
        "{} {} for doctor {}",
        new.date,
        new.start_time.format("%H:%M"),
        new.doctor_id
    );
    let appointment = state
        .appointments
        .create_appointment(new)
        .await?
        .ok_or_else(|| BookingError::Conflict(format!("Slot {} was just booked", description)))?;

    tracing::info!(
        appointment_id = %appointment.id,
        doctor_id = %appointment.doctor_id,
        date = %appointment.date,
        "Appointment booked"
    );

    Ok((StatusCode::CREATED, Json(appointment)))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Appointment>, AppError> {
    let appointment = state
        .appointments
        .get_appointment(id)
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Appointment with ID {} not found", id)))?;

    Ok(Json(appointment))
}

/// Cancels an appointment, returning its slot to the availability list.
///
/// Cancelling twice returns the cancelled appointment again. Completed visits
/// are part of the patient's history and cannot be cancelled.
#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Appointment>, AppError> {
    if let Some(appointment) = state.appointments.cancel_appointment(id).await? {
        tracing::info!(appointment_id = %id, "Appointment cancelled");
        return Ok(Json(appointment));
    }

    match state.appointments.get_appointment(id).await? {
        Some(existing) if existing.status == AppointmentStatus::Cancelled => Ok(Json(existing)),
        Some(existing) => Err(AppError(BookingError::Conflict(format!(
            "Appointment {} is {} and can no longer be cancelled",
            id, existing.status
        )))),
        None => Err(AppError(BookingError::NotFound(format!(
            "Appointment with ID {} not found",
            id
        )))),
    }
}
