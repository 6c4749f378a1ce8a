//! # Availability Resolution
//!
//! Turns a doctor's recurring weekly template and the appointments already
//! booked against it into the list of slots a patient can still take.
//!
//! ## Slot grid
//!
//! Candidates are generated by stepping from the template's start time in
//! `slot_minutes` increments. Slots are half-open intervals `[start, end)`, so
//! a 09:00–11:00 template with 30 minute slots yields 09:00, 09:30, 10:00 and
//! 10:30. A trailing remainder shorter than one slot is never offered.
//!
//! ## Collisions
//!
//! A candidate is removed when a non-cancelled appointment for the same doctor
//! and date starts at the same time. Appointments that merely overlap a
//! candidate without sharing its start time do not remove it.

use std::collections::{HashMap, HashSet};

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use tracing::debug;

use crate::{
    errors::{BookingError, BookingResult},
    models::{
        appointment::{Appointment, NewAppointment},
        doctor::{Doctor, ScheduleTemplate},
        slot::Slot,
    },
    store::ScheduleStore,
};

/// Days searched by [`AvailabilityResolver::available_dates`] when the caller
/// does not say.
pub const DEFAULT_HORIZON_DAYS: u32 = 30;

/// Upper bound on the search horizon; one year of days.
pub const MAX_HORIZON_DAYS: u32 = 366;

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(raw: &str) -> BookingResult<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(BookingError::InvalidInput("date is required".to_string()));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        BookingError::InvalidInput(format!(
            "Invalid date '{}'. Expected a calendar date in YYYY-MM-DD format",
            raw
        ))
    })
}

/// Parses a wall-clock time given as `HH:MM` or `HH:MM:SS`.
pub fn parse_time(raw: &str) -> BookingResult<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .map_err(|_| {
            BookingError::InvalidInput(format!(
                "Invalid time '{}'. Expected HH:MM or HH:MM:SS",
                raw
            ))
        })
}

/// Applies the default horizon and rejects non-positive or oversized values.
pub fn resolve_horizon(days: Option<i64>) -> BookingResult<u32> {
    let Some(days) = days else {
        return Ok(DEFAULT_HORIZON_DAYS);
    };

    if days < 1 {
        return Err(BookingError::InvalidInput(format!(
            "days must be a positive integer, got {}",
            days
        )));
    }

    match u32::try_from(days) {
        Ok(days) if days <= MAX_HORIZON_DAYS => Ok(days),
        _ => Err(BookingError::InvalidInput(format!(
            "days must not exceed {}",
            MAX_HORIZON_DAYS
        ))),
    }
}

/// Every slot the template offers on `date`, ignoring bookings.
///
/// Returns nothing when the template belongs to another weekday, has a zero
/// slot length, or ends before it starts.
pub fn candidate_slots(template: &ScheduleTemplate, date: NaiveDate) -> Vec<Slot> {
    if template.weekday != date.weekday()
        || template.slot_minutes == 0
        || template.start_time >= template.end_time
    {
        return Vec::new();
    }

    let step = template.slot_length();
    let mut slots = Vec::new();
    let mut start = template.start_time;

    loop {
        let (end, wrapped) = start.overflowing_add_signed(step);
        // A slot that would run past midnight is past any template end.
        if wrapped != 0 || end > template.end_time {
            break;
        }

        slots.push(Slot {
            date,
            start_time: start,
            end_time: end,
            doctor_id: template.doctor_id.clone(),
        });
        start = end;
    }

    slots
}

/// Merges templates and appointments into the free slots for `date`.
///
/// The result is sorted chronologically and free of duplicates, which can
/// appear when two template rows of the same doctor overlap.
pub fn free_slots(
    date: NaiveDate,
    templates: &[ScheduleTemplate],
    appointments: &[Appointment],
) -> Vec<Slot> {
    let booked: HashSet<(&str, NaiveTime)> = appointments
        .iter()
        .filter(|a| a.date == date && a.blocks_slot())
        .map(|a| (a.doctor_id.as_str(), a.start_time))
        .collect();

    let mut slots: Vec<Slot> = templates
        .iter()
        .flat_map(|template| candidate_slots(template, date))
        .filter(|slot| !booked.contains(&(slot.doctor_id.as_str(), slot.start_time)))
        .collect();

    slots.sort();
    slots.dedup();
    slots
}

fn normalize_doctor_id(doctor_id: Option<&str>) -> Option<&str> {
    doctor_id.map(str::trim).filter(|id| !id.is_empty())
}

fn require_doctor_id(doctor_id: &str) -> BookingResult<&str> {
    normalize_doctor_id(Some(doctor_id))
        .ok_or_else(|| BookingError::InvalidInput("doctorId is required".to_string()))
}

/// Resolves availability against a [`ScheduleStore`].
///
/// The resolver is read-only and holds no state of its own, so one can be
/// built per request.
pub struct AvailabilityResolver<'a> {
    store: &'a dyn ScheduleStore,
}

impl<'a> AvailabilityResolver<'a> {
    pub fn new(store: &'a dyn ScheduleStore) -> Self {
        Self { store }
    }

    /// Free slots on `date` for one doctor, or for every doctor when
    /// `doctor_id` is `None` or blank.
    ///
    /// # Errors
    ///
    /// * `BookingError::InvalidInput` - `date` is not a `YYYY-MM-DD` calendar date
    /// * `BookingError::UpstreamFailure` - a store query failed
    pub async fn available_slots(
        &self,
        date: &str,
        doctor_id: Option<&str>,
    ) -> BookingResult<Vec<Slot>> {
        let date = parse_date(date)?;
        self.slots_on(date, normalize_doctor_id(doctor_id)).await
    }

    /// Days from `today` through `today + horizon` with at least one free slot
    /// for `doctor_id`, in increasing order.
    ///
    /// Templates repeat weekly, so they are loaded at most once per weekday;
    /// appointments are loaded only for days the doctor actually works.
    pub async fn available_dates(
        &self,
        doctor_id: &str,
        horizon_days: Option<i64>,
        today: NaiveDate,
    ) -> BookingResult<Vec<NaiveDate>> {
        let doctor_id = require_doctor_id(doctor_id)?;
        let horizon = resolve_horizon(horizon_days)?;

        debug!(doctor_id, horizon, %today, "Searching available dates");

        let mut templates_by_weekday: HashMap<Weekday, Vec<ScheduleTemplate>> = HashMap::new();
        let mut dates = Vec::new();

        for offset in 0..=u64::from(horizon) {
            let Some(date) = today.checked_add_days(Days::new(offset)) else {
                break;
            };

            let weekday = date.weekday();
            if !templates_by_weekday.contains_key(&weekday) {
                let templates = self
                    .store
                    .doctor_templates(Some(doctor_id.to_string()), weekday)
                    .await?;
                templates_by_weekday.insert(weekday, templates);
            }

            let templates = &templates_by_weekday[&weekday];
            if templates.is_empty() {
                continue;
            }

            let appointments = self
                .store
                .list_appointments(Some(doctor_id.to_string()), date)
                .await?;

            if !free_slots(date, templates, &appointments).is_empty() {
                dates.push(date);
            }
        }

        Ok(dates)
    }

    /// The doctor's full weekly template, Monday first.
    ///
    /// # Errors
    ///
    /// * `BookingError::InvalidInput` - blank doctor id
    /// * `BookingError::NotFound` - the doctor has no working hours on any day
    pub async fn weekly_schedule(&self, doctor_id: &str) -> BookingResult<Doctor> {
        let doctor_id = require_doctor_id(doctor_id)?;

        let mut templates = Vec::new();
        let mut weekday = Weekday::Mon;
        for _ in 0..7 {
            let mut day = self
                .store
                .doctor_templates(Some(doctor_id.to_string()), weekday)
                .await?;
            day.sort_by_key(|t| (t.start_time, t.end_time));
            templates.extend(day);
            weekday = weekday.succ();
        }

        let name = templates
            .first()
            .map(|t| t.doctor_name.clone())
            .ok_or_else(|| {
                BookingError::NotFound(format!("No schedule found for doctor {}", doctor_id))
            })?;

        Ok(Doctor {
            id: doctor_id.to_string(),
            name,
            templates,
        })
    }

    /// Whether `appointment` targets a slot that is currently free.
    ///
    /// A slot whose start is not after `now` has already begun and is never
    /// free.
    pub async fn is_slot_free(
        &self,
        appointment: &NewAppointment,
        now: NaiveDateTime,
    ) -> BookingResult<bool> {
        if appointment.date.and_time(appointment.start_time) <= now {
            debug!(
                doctor_id = %appointment.doctor_id,
                date = %appointment.date,
                start_time = %appointment.start_time,
                "Requested slot is in the past"
            );
            return Ok(false);
        }

        let slots = self
            .slots_on(appointment.date, Some(appointment.doctor_id.as_str()))
            .await?;

        Ok(slots.iter().any(|slot| {
            slot.doctor_id == appointment.doctor_id && slot.start_time == appointment.start_time
        }))
    }

    async fn slots_on(&self, date: NaiveDate, doctor_id: Option<&str>) -> BookingResult<Vec<Slot>> {
        let owned_id = doctor_id.map(str::to_string);

        let templates = self
            .store
            .doctor_templates(owned_id.clone(), date.weekday())
            .await?;
        if templates.is_empty() {
            debug!(?doctor_id, %date, "No templates for weekday");
            return Ok(Vec::new());
        }

        let appointments = self.store.list_appointments(owned_id, date).await?;
        let slots = free_slots(date, &templates, &appointments);

        debug!(
            ?doctor_id,
            %date,
            templates = templates.len(),
            appointments = appointments.len(),
            free = slots.len(),
            "Resolved available slots"
        );

        Ok(slots)
    }
}
