use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use booking_core::{availability::AvailabilityResolver, models::doctor::Doctor};

use crate::{middleware::error_handling::AppError, ApiState};

/// Weekly working hours of one doctor, Monday first.
#[axum::debug_handler]
pub async fn get_doctor_schedule(
    State(state): State<Arc<ApiState>>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Doctor>, AppError> {
    let resolver = AvailabilityResolver::new(state.schedules.as_ref());
    let doctor = resolver.weekly_schedule(&doctor_id).await?;

    Ok(Json(doctor))
}
