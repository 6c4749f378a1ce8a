use color_eyre::eyre::Result;
use dotenv::dotenv;
use booking_api::config::ApiConfig;
use booking_db::{create_khanza_pool, create_pool, SqlStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Application database for appointments, Khanza for doctor schedules
    let db_pool = create_pool(&config.database_url).await?;
    let khanza_pool = create_khanza_pool(&config.khanza_database_url).await?;
    let store = SqlStore::new(db_pool, khanza_pool, config.slot_minutes);

    // Start API server
    booking_api::start_server(config, store).await?;

    Ok(())
}
