use booking_core::models::appointment::{Appointment, AppointmentStatus};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub doctor_id: String,
    pub patient_id: String,
    pub appointment_date: NaiveDate,
    pub start_time: NaiveTime,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbAppointment> for Appointment {
    type Error = eyre::Report;

    fn try_from(row: DbAppointment) -> eyre::Result<Self> {
        let status = row
            .status
            .parse::<AppointmentStatus>()
            .map_err(|e| eyre::eyre!("Appointment {} has {}", row.id, e))?;

        Ok(Appointment {
            id: row.id,
            doctor_id: row.doctor_id,
            patient_id: row.patient_id,
            date: row.appointment_date,
            start_time: row.start_time,
            status,
            created_at: row.created_at,
        })
    }
}

/// A row of Khanza's `jadwal` table joined with `dokter`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbJadwal {
    pub kd_dokter: String,
    pub nm_dokter: Option<String>,
    pub hari_kerja: String,
    pub jam_mulai: NaiveTime,
    pub jam_selesai: NaiveTime,
}
