use crate::models::DbAppointment;
use chrono::{NaiveDate, NaiveTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Inserts a pending appointment.
///
/// Returns `None` when the partial unique index on live appointments already
/// holds this (doctor, date, start time).
pub async fn create_appointment(
    pool: &Pool<Postgres>,
    doctor_id: &str,
    patient_id: &str,
    appointment_date: NaiveDate,
    start_time: NaiveTime,
) -> Result<Option<DbAppointment>> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating appointment: id={}, doctor_id={}, date={}, start_time={}",
        id, doctor_id, appointment_date, start_time
    );

    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        INSERT INTO appointments (id, doctor_id, patient_id, appointment_date, start_time, status, created_at)
        VALUES ($1, $2, $3, $4, $5, 'pending', $6)
        ON CONFLICT DO NOTHING
        RETURNING id, doctor_id, patient_id, appointment_date, start_time, status, created_at
        "#,
    )
    .bind(id)
    .bind(doctor_id)
    .bind(patient_id)
    .bind(appointment_date)
    .bind(start_time)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    if appointment.is_none() {
        tracing::debug!(
            "Slot already taken: doctor_id={}, date={}, start_time={}",
            doctor_id, appointment_date, start_time
        );
    }

    Ok(appointment)
}

pub async fn get_appointment_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbAppointment>> {
    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, doctor_id, patient_id, appointment_date, start_time, status, created_at
        FROM appointments
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}

/// Live (non-cancelled) appointments on `appointment_date`, optionally for a
/// single doctor, ordered by start time.
pub async fn list_appointments(
    pool: &Pool<Postgres>,
    doctor_id: Option<&str>,
    appointment_date: NaiveDate,
) -> Result<Vec<DbAppointment>> {
    let appointments = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, doctor_id, patient_id, appointment_date, start_time, status, created_at
        FROM appointments
        WHERE appointment_date = $1
          AND status <> 'cancelled'
          AND ($2::VARCHAR IS NULL OR doctor_id = $2)
        ORDER BY start_time ASC, doctor_id ASC
        "#,
    )
    .bind(appointment_date)
    .bind(doctor_id)
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}

/// Marks a pending or confirmed appointment cancelled, which frees its slot.
///
/// Returns `None` when no such appointment exists or it is already cancelled
/// or completed.
pub async fn cancel_appointment(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbAppointment>> {
    tracing::debug!("Cancelling appointment: id={}", id);

    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        UPDATE appointments
        SET status = 'cancelled'
        WHERE id = $1
          AND status IN ('pending', 'confirmed')
        RETURNING id, doctor_id, patient_id, appointment_date, start_time, status, created_at
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}
