use axum::http::StatusCode;
use booking_core::models::appointment::{Appointment, AppointmentStatus, NewAppointment};
use chrono::{Datelike, Local, NaiveDate, Utc, Weekday};
use fake::{faker::number::en::NumberWithFormat, Fake};
use mockall::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};
use uuid::Uuid;

use super::test_utils::{appointment, monday, template, time, upcoming_monday, TestContext, DOCTOR_ID};

fn last_monday() -> NaiveDate {
    let mut date = Local::now().date_naive().pred_opt().unwrap();
    while date.weekday() != Weekday::Mon {
        date = date.pred_opt().unwrap();
    }
    date
}

fn patient_id() -> String {
    NumberWithFormat("######").fake()
}

fn expect_monday_morning(ctx: &mut TestContext, booked: Vec<Appointment>) {
    ctx.schedule_repo
        .expect_doctor_templates()
        .returning(|_, weekday| {
            Ok(match weekday {
                Weekday::Mon => vec![template(DOCTOR_ID, weekday, time(9, 0), time(11, 0))],
                _ => vec![],
            })
        });
    ctx.schedule_repo
        .expect_list_appointments()
        .returning(move |_, _| Ok(booked.clone()));
}

#[tokio::test]
async fn test_create_appointment_books_free_slot() {
    let mut ctx = TestContext::new();
    let patient = patient_id();
    expect_monday_morning(&mut ctx, vec![]);

    let expected = NewAppointment {
        doctor_id: DOCTOR_ID.to_string(),
        patient_id: patient.clone(),
        date: upcoming_monday(),
        start_time: time(9, 30),
    };
    ctx.appointment_repo
        .expect_create_appointment()
        .with(predicate::eq(expected))
        .times(1)
        .returning(|new| {
            Ok(Some(Appointment {
                id: Uuid::new_v4(),
                doctor_id: new.doctor_id,
                patient_id: new.patient_id,
                date: new.date,
                start_time: new.start_time,
                status: AppointmentStatus::Pending,
                created_at: Utc::now(),
            }))
        });

    let server = ctx.server();
    let response = server
        .post("/api/appointments")
        .json(&json!({
            "doctorId": DOCTOR_ID,
            "patientId": patient,
            "date": upcoming_monday().to_string(),
            "startTime": "09:30",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Appointment = response.json();
    assert_eq!(body.status, AppointmentStatus::Pending);
    assert_eq!(body.start_time, time(9, 30));
    assert_eq!(body.patient_id, patient);
}

#[tokio::test]
async fn test_create_appointment_rejects_taken_slot() {
    let mut ctx = TestContext::new();
    expect_monday_morning(
        &mut ctx,
        vec![appointment(DOCTOR_ID, upcoming_monday(), time(9, 30), AppointmentStatus::Confirmed)],
    );
    ctx.appointment_repo.expect_create_appointment().never();

    let server = ctx.server();
    let response = server
        .post("/api/appointments")
        .json(&json!({
            "doctorId": DOCTOR_ID,
            "patientId": patient_id(),
            "date": upcoming_monday().to_string(),
            "startTime": "09:30",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_appointment_rejects_off_grid_time() {
    let mut ctx = TestContext::new();
    expect_monday_morning(&mut ctx, vec![]);
    ctx.appointment_repo.expect_create_appointment().never();

    let server = ctx.server();
    let response = server
        .post("/api/appointments")
        .json(&json!({
            "doctorId": DOCTOR_ID,
            "patientId": patient_id(),
            "date": upcoming_monday().to_string(),
            "startTime": "09:15",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[rstest]
#[case::past_monday("2020-01-06")]
#[case::last_monday_before_today(last_monday().to_string())]
#[tokio::test]
async fn test_create_appointment_rejects_past_slot(#[case] date: String) {
    let mut ctx = TestContext::new();
    expect_monday_morning(&mut ctx, vec![]);
    ctx.appointment_repo.expect_create_appointment().never();

    let server = ctx.server();
    let response = server
        .post("/api/appointments")
        .json(&json!({
            "doctorId": DOCTOR_ID,
            "patientId": patient_id(),
            "date": date,
            "startTime": "09:00",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_appointment_lost_race_is_conflict() {
    let mut ctx = TestContext::new();
    expect_monday_morning(&mut ctx, vec![]);
    ctx.appointment_repo
        .expect_create_appointment()
        .times(1)
        .returning(|_| Ok(None));

    let server = ctx.server();
    let response = server
        .post("/api/appointments")
        .json(&json!({
            "doctorId": DOCTOR_ID,
            "patientId": patient_id(),
            "date": upcoming_monday().to_string(),
            "startTime": "10:00",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("just booked"));
}

#[tokio::test]
async fn test_create_appointment_requires_fields() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/appointments")
        .json(&json!({ "doctorId": DOCTOR_ID, "date": upcoming_monday().to_string(), "startTime": "09:00" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid input: patientId is required");
}

#[tokio::test]
async fn test_get_appointment() {
    let mut ctx = TestContext::new();
    let stored = appointment(DOCTOR_ID, monday(), time(9, 0), AppointmentStatus::Confirmed);
    let id = stored.id;

    ctx.appointment_repo
        .expect_get_appointment()
        .with(predicate::eq(id))
        .times(1)
        .returning(move |_| Ok(Some(stored.clone())));

    let server = ctx.server();
    let response = server.get(&format!("/api/appointments/{}", id)).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Appointment = response.json();
    assert_eq!(body.id, id);
}

#[tokio::test]
async fn test_get_unknown_appointment_is_404() {
    let mut ctx = TestContext::new();
    ctx.appointment_repo
        .expect_get_appointment()
        .returning(|_| Ok(None));

    let server = ctx.server();
    let response = server
        .get(&format!("/api/appointments/{}", Uuid::new_v4()))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cancel_appointment() {
    let mut ctx = TestContext::new();
    let id = Uuid::new_v4();

    ctx.appointment_repo
        .expect_cancel_appointment()
        .with(predicate::eq(id))
        .times(1)
        .returning(|id| {
            let mut cancelled = appointment(DOCTOR_ID, monday(), time(9, 0), AppointmentStatus::Cancelled);
            cancelled.id = id;
            Ok(Some(cancelled))
        });

    let server = ctx.server();
    let response = server
        .post(&format!("/api/appointments/{}/cancel", id))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Appointment = response.json();
    assert_eq!(body.status, AppointmentStatus::Cancelled);
    assert!(!body.blocks_slot());
}

#[tokio::test]
async fn test_cancel_unknown_appointment_is_404() {
    let mut ctx = TestContext::new();
    ctx.appointment_repo
        .expect_cancel_appointment()
        .returning(|_| Ok(None));
    ctx.appointment_repo
        .expect_get_appointment()
        .returning(|_| Ok(None));

    let server = ctx.server();
    let response = server
        .post(&format!("/api/appointments/{}/cancel", Uuid::new_v4()))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cancel_completed_appointment_is_conflict() {
    let mut ctx = TestContext::new();
    let completed = appointment(DOCTOR_ID, monday(), time(9, 0), AppointmentStatus::Completed);
    let id = completed.id;

    ctx.appointment_repo
        .expect_cancel_appointment()
        .with(predicate::eq(id))
        .times(1)
        .returning(|_| Ok(None));
    ctx.appointment_repo
        .expect_get_appointment()
        .with(predicate::eq(id))
        .times(1)
        .returning(move |_| Ok(Some(completed.clone())));

    let server = ctx.server();
    let response = server
        .post(&format!("/api/appointments/{}/cancel", id))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("completed"));
}

#[tokio::test]
async fn test_cancel_twice_returns_cancelled_appointment() {
    let mut ctx = TestContext::new();
    let cancelled = appointment(DOCTOR_ID, monday(), time(9, 0), AppointmentStatus::Cancelled);
    let id = cancelled.id;

    ctx.appointment_repo
        .expect_cancel_appointment()
        .returning(|_| Ok(None));
    ctx.appointment_repo
        .expect_get_appointment()
        .returning(move |_| Ok(Some(cancelled.clone())));

    let server = ctx.server();
    let response = server
        .post(&format!("/api/appointments/{}/cancel", id))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Appointment = response.json();
    assert_eq!(body.status, AppointmentStatus::Cancelled);
}
