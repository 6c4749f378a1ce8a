use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/api/doctors/:doctor_id/schedule",
        get(handlers::doctor::get_doctor_schedule),
    )
}
