pub mod models;
pub mod repositories;
pub mod schema;
pub mod store;

pub mod mock;

use eyre::{Result, WrapErr};
use sqlx::mysql::MySqlPoolOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::{MySql, Pool, Postgres};

pub use store::SqlStore;

/// Application database holding appointments.
pub type DbPool = Pool<Postgres>;

/// Khanza hospital information system database, read-only.
pub type KhanzaPool = Pool<MySql>;

pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
        .wrap_err("Failed to connect to the application database")?;

    Ok(pool)
}

pub async fn create_khanza_pool(database_url: &str) -> Result<KhanzaPool> {
    let pool = MySqlPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
        .wrap_err("Failed to connect to the Khanza database")?;

    Ok(pool)
}
