//! Postgres connection pool.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::DbError;

/// Type alias for the shared Postgres pool used across the whole application.
pub type DbPool = PgPool;

/// Connection settings, filled in by the binary from flags / environment.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl PoolConfig {
    pub fn new(database_url: impl Into<String>, max_connections: u32) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections,
            acquire_timeout: Duration::from_secs(5),
        }
    }

    fn options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout)
    }
}

/// Create a new connection pool and open the first connection.
pub async fn create_pool(config: &PoolConfig) -> Result<DbPool, DbError> {
    info!("Connecting to database (max_connections={})", config.max_connections);
    let pool = config.options().connect(&config.database_url).await?;
    Ok(pool)
}

/// Create a pool that connects on first use.
///
/// Only the URL is validated here; nothing touches the network until a
/// query runs.
pub fn create_lazy_pool(config: &PoolConfig) -> Result<DbPool, DbError> {
    Ok(config.options().connect_lazy(&config.database_url)?)
}

/// Run the embedded migrations from the workspace `migrations/` directory.
pub async fn run_migrations(pool: &DbPool) -> Result<(), DbError> {
    info!("Running database migrations");
    sqlx::migrate!("../../migrations").run(pool).await?;
    Ok(())
}
