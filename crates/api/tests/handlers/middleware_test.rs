use axum::{http::StatusCode, response::IntoResponse};
use booking_api::middleware::error_handling::AppError;
use booking_core::errors::BookingError;
use rstest::rstest;
use serde_json::Value;

use super::test_utils::TestContext;

#[rstest]
#[case(BookingError::InvalidInput("date is required".into()), StatusCode::BAD_REQUEST)]
#[case(BookingError::NotFound("Appointment not found".into()), StatusCode::NOT_FOUND)]
#[case(BookingError::Conflict("Slot taken".into()), StatusCode::CONFLICT)]
#[case(BookingError::UpstreamFailure(eyre::eyre!("Database error")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(
    BookingError::Internal(Box::new(std::io::Error::new(std::io::ErrorKind::Other, "Internal error"))),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn test_error_status_mapping(#[case] error: BookingError, #[case] status: StatusCode) {
    let response = AppError(error).into_response();

    assert_eq!(response.status(), status);
}

#[test]
fn test_eyre_report_becomes_upstream_failure() {
    let error: AppError = eyre::eyre!("pool timed out").into();

    assert!(matches!(error.0, BookingError::UpstreamFailure(_)));
    assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_health_and_version() {
    let server = TestContext::new().server();

    let health: Value = server.get("/health").await.json();
    assert_eq!(health["status"], "ok");

    let version: Value = server.get("/version").await.json();
    assert_eq!(version["name"], "booking-api");
    assert!(version["version"].is_string());
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let server = TestContext::new().server();

    let response = server.get("/api/unknown").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
