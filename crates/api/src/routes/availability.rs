use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/appointments/available",
            get(handlers::availability::available_slots),
        )
        .route(
            "/api/appointments/available-dates",
            get(handlers::availability::available_dates),
        )
}
