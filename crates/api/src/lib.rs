//! # Booking API
//!
//! The API crate provides the web server for the hospital booking service. It
//! exposes appointment availability computed from the doctors' working hours
//! in Khanza and the appointments held in the application database.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Parse requests and call into `booking-core`
//! - **Middleware**: Error-to-response mapping
//! - **Config**: Environment configuration
//!
//! Handlers depend only on the store traits from `booking-core`, so the whole
//! router can be exercised against mocks.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Middleware for error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    error_handling::HandleErrorLayer,
    http::{header, HeaderValue, Method, StatusCode},
    Router,
};
use booking_core::store::{AppointmentStore, ScheduleStore};
use booking_db::SqlStore;
use eyre::{Result, WrapErr};
use tokio::net::TcpListener;
use tower::{BoxError, ServiceBuilder};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Doctor templates and existing bookings, read-only
    pub schedules: Arc<dyn ScheduleStore>,
    /// Appointment writes
    pub appointments: Arc<dyn AppointmentStore>,
}

impl ApiState {
    /// State backed by a single store implementing both traits.
    pub fn from_store<S>(store: S) -> Self
    where
        S: ScheduleStore + AppointmentStore + 'static,
    {
        let store = Arc::new(store);
        Self {
            schedules: store.clone(),
            appointments: store,
        }
    }
}

/// Builds the application router with all routes attached to `state`.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Availability endpoints
        .merge(routes::availability::routes())
        // Appointment booking endpoints
        .merge(routes::appointment::routes())
        // Doctor directory endpoints
        .merge(routes::doctor::routes())
        // Attach shared state to all routes
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .wrap_err_with(|| format!("Invalid CORS origin '{}'", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_origin(origins)
        .allow_credentials(true))
}

/// Starts the API server
///
/// Initializes logging, builds the router over `store` and serves until the
/// listener fails.
///
/// # Example
///
/// ```no_run
/// # async fn run() -> eyre::Result<()> {
/// use booking_api::config::ApiConfig;
/// use booking_db::{create_khanza_pool, create_pool, SqlStore};
///
/// let config = ApiConfig::from_env()?;
/// let db_pool = create_pool(&config.database_url).await?;
/// let khanza_pool = create_khanza_pool(&config.khanza_database_url).await?;
/// let store = SqlStore::new(db_pool, khanza_pool, config.slot_minutes);
/// booking_api::start_server(config, store).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, store: SqlStore) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState::from_store(store));
    let app = app(state).layer(TraceLayer::new_for_http());

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)?),
        None => app,
    };

    // Add request timeout middleware
    let app = app.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(|_: BoxError| async {
                StatusCode::REQUEST_TIMEOUT
            }))
            .timeout(Duration::from_secs(config.request_timeout)),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
