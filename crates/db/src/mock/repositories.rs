use async_trait::async_trait;
use booking_core::{
    models::{
        appointment::{Appointment, NewAppointment},
        doctor::ScheduleTemplate,
    },
    store::{AppointmentStore, ScheduleStore},
};
use chrono::{NaiveDate, Weekday};
use mockall::mock;
use uuid::Uuid;

// Mock repositories for testing
mock! {
    pub ScheduleRepo {}

    #[async_trait]
    impl ScheduleStore for ScheduleRepo {
        async fn doctor_templates(
            &self,
            doctor_id: Option<String>,
            weekday: Weekday,
        ) -> eyre::Result<Vec<ScheduleTemplate>>;

        async fn list_appointments(
            &self,
            doctor_id: Option<String>,
            date: NaiveDate,
        ) -> eyre::Result<Vec<Appointment>>;
    }
}

mock! {
    pub AppointmentRepo {}

    #[async_trait]
    impl AppointmentStore for AppointmentRepo {
        async fn create_appointment(
            &self,
            appointment: NewAppointment,
        ) -> eyre::Result<Option<Appointment>>;

        async fn get_appointment(&self, id: Uuid) -> eyre::Result<Option<Appointment>>;

        async fn cancel_appointment(&self, id: Uuid) -> eyre::Result<Option<Appointment>>;
    }
}
