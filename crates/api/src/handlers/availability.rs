//! # Availability Handlers
//!
//! Thin HTTP wrappers around [`AvailabilityResolver`]. They only pull the raw
//! query values out of the request; validation and slot computation live in
//! `booking-core` so they can be tested without a network layer.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use booking_core::{
    availability::AvailabilityResolver,
    errors::BookingError,
    models::slot::{AvailableDatesResponse, AvailableSlotsResponse},
};
use chrono::Local;
use serde::Deserialize;

use crate::{middleware::error_handling::AppError, ApiState};

/// Query parameters for `GET /api/appointments/available`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableSlotsQuery {
    /// Khanza doctor code; omitted means every doctor
    pub doctor_id: Option<String>,
    /// Calendar date, `YYYY-MM-DD`
    pub date: Option<String>,
}

/// Query parameters for `GET /api/appointments/available-dates`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableDatesQuery {
    pub doctor_id: Option<String>,
    /// Horizon in days, kept as text so a malformed value gets a JSON 400
    pub days: Option<String>,
}

fn parse_days(days: Option<&str>) -> Result<Option<i64>, BookingError> {
    match days.map(str::trim).filter(|d| !d.is_empty()) {
        None => Ok(None),
        Some(raw) => raw.parse::<i64>().map(Some).map_err(|_| {
            BookingError::InvalidInput(format!("days must be a positive integer, got '{}'", raw))
        }),
    }
}

/// Lists the free slots on a date
///
/// # Endpoint
///
/// ```text
/// GET /api/appointments/available?doctorId=D0000004&date=2026-10-19
/// ```
///
/// # Errors
///
/// * `400` - `date` missing or not a calendar date
/// * `500` - a database query failed
#[axum::debug_handler]
pub async fn available_slots(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<AvailableSlotsQuery>,
) -> Result<Json<AvailableSlotsResponse>, AppError> {
    let resolver = AvailabilityResolver::new(state.schedules.as_ref());

    let slots = resolver
        .available_slots(
            query.date.as_deref().unwrap_or_default(),
            query.doctor_id.as_deref(),
        )
        .await?;

    Ok(Json(AvailableSlotsResponse { slots }))
}

/// Lists the dates from today on which a doctor still has a free slot
///
/// # Endpoint
///
/// ```text
/// GET /api/appointments/available-dates?doctorId=D0000004&days=14
/// ```
///
/// # Errors
///
/// * `400` - `doctorId` missing, or `days` not a positive integer
/// * `500` - a database query failed
#[axum::debug_handler]
pub async fn available_dates(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<AvailableDatesQuery>,
) -> Result<Json<AvailableDatesResponse>, AppError> {
    let days = parse_days(query.days.as_deref())?;
    let today = Local::now().date_naive();
    let resolver = AvailabilityResolver::new(state.schedules.as_ref());

    let dates = resolver
        .available_dates(query.doctor_id.as_deref().unwrap_or_default(), days, today)
        .await?;

    Ok(Json(AvailableDatesResponse { dates }))
}
