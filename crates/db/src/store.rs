use async_trait::async_trait;
use booking_core::{
    models::{
        appointment::{Appointment, NewAppointment},
        doctor::ScheduleTemplate,
    },
    store::{AppointmentStore, ScheduleStore},
};
use chrono::{NaiveDate, Weekday};
use eyre::Result;
use uuid::Uuid;

use crate::{
    repositories::{appointment, schedule},
    DbPool, KhanzaPool,
};

/// Store backed by the two SQL databases: templates come from Khanza,
/// appointments from the application database.
#[derive(Clone)]
pub struct SqlStore {
    pub db_pool: DbPool,
    pub khanza_pool: KhanzaPool,
    pub slot_minutes: u32,
}

impl SqlStore {
    pub fn new(db_pool: DbPool, khanza_pool: KhanzaPool, slot_minutes: u32) -> Self {
        Self {
            db_pool,
            khanza_pool,
            slot_minutes,
        }
    }
}

#[async_trait]
impl ScheduleStore for SqlStore {
    async fn doctor_templates(
        &self,
        doctor_id: Option<String>,
        weekday: Weekday,
    ) -> Result<Vec<ScheduleTemplate>> {
        schedule::get_doctor_templates(
            &self.khanza_pool,
            doctor_id.as_deref(),
            weekday,
            self.slot_minutes,
        )
        .await
    }

    async fn list_appointments(
        &self,
        doctor_id: Option<String>,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>> {
        appointment::list_appointments(&self.db_pool, doctor_id.as_deref(), date)
            .await?
            .into_iter()
            .map(Appointment::try_from)
            .collect()
    }
}

#[async_trait]
impl AppointmentStore for SqlStore {
    async fn create_appointment(&self, new: NewAppointment) -> Result<Option<Appointment>> {
        appointment::create_appointment(
            &self.db_pool,
            &new.doctor_id,
            &new.patient_id,
            new.date,
            new.start_time,
        )
        .await?
        .map(Appointment::try_from)
        .transpose()
    }

    async fn get_appointment(&self, id: Uuid) -> Result<Option<Appointment>> {
        appointment::get_appointment_by_id(&self.db_pool, id)
            .await?
            .map(Appointment::try_from)
            .transpose()
    }

    async fn cancel_appointment(&self, id: Uuid) -> Result<Option<Appointment>> {
        appointment::cancel_appointment(&self.db_pool, id)
            .await?
            .map(Appointment::try_from)
            .transpose()
    }
}
