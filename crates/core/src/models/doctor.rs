use chrono::{Duration, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use super::hhmm;

/// One row of a doctor's recurring weekly working hours.
///
/// Slots are generated from `start_time` in steps of `slot_minutes`; a slot is
/// only offered when it ends at or before `end_time`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleTemplate {
    pub doctor_id: String,
    pub doctor_name: String,
    pub weekday: Weekday,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub slot_minutes: u32,
}

impl ScheduleTemplate {
    pub fn slot_length(&self) -> Duration {
        Duration::minutes(i64::from(self.slot_minutes))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub templates: Vec<ScheduleTemplate>,
}
