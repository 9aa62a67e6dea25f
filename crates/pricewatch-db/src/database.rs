use std::str::FromStr;

use pricewatch_core::AppError;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::config::DatabaseConfig;
use crate::repository::ObservationRepository;

/// Central database facade — owns the connection pool, initializes the
/// schema, and vends repository instances. Opened once per run; the
/// search/persist/trend flow shares the single handle.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating the file if missing) with the given configuration.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| AppError::ConfigError(format!("Invalid database url: {e}")))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to connect: {e}")))?;

        Ok(Self { pool })
    }

    /// Create a `Database` from an existing pool (useful for testing).
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the observations table and index if absent. Idempotent.
    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        self.observation_repo().ensure_schema().await
    }

    /// Get an [`ObservationRepository`] backed by this pool.
    pub fn observation_repo(&self) -> ObservationRepository {
        ObservationRepository::new(self.pool.clone())
    }

    /// Get a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
