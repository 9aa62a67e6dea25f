use chrono::{DateTime, Utc};
use pricewatch_core::error::AppError;
use pricewatch_core::models::{Listing, Observation, TrendPoint, TrendSeries};
use sqlx::SqlitePool;

/// Repository for price observation persistence in SQLite.
///
/// The store is append-only: every batch accumulates an independent
/// historical snapshot; rows are never updated or deleted.
#[derive(Clone)]
pub struct ObservationRepository {
    pool: SqlitePool,
}

impl ObservationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the observations table and its query index if absent.
    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS observations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                search_query TEXT NOT NULL,
                title TEXT NOT NULL,
                price REAL NOT NULL,
                condition TEXT NOT NULL,
                link TEXT NOT NULL,
                observed_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_observations_query_time
            ON observations (search_query, observed_at)
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// Append one row per listing for `search_query` in a single
    /// transaction, all stamped with the insertion time. Returns the
    /// number of rows written.
    pub async fn append_batch(
        &self,
        search_query: &str,
        listings: &[Listing],
    ) -> Result<u64, AppError> {
        if listings.is_empty() {
            return Ok(0);
        }

        let observed_at: DateTime<Utc> = Utc::now();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        for listing in listings {
            sqlx::query(
                r#"
                INSERT INTO observations (search_query, title, price, condition, link, observed_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )
            .bind(search_query)
            .bind(&listing.title)
            .bind(listing.price)
            .bind(&listing.condition)
            .bind(&listing.link)
            .bind(observed_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        tracing::info!(
            term = search_query,
            rows = listings.len(),
            "Appended observation batch"
        );
        Ok(listings.len() as u64)
    }

    /// All observations for a search term as `(timestamp, price)` pairs,
    /// ordered by timestamp ascending. Unknown terms yield an empty series.
    pub async fn series_for(&self, search_query: &str) -> Result<TrendSeries, AppError> {
        let rows: Vec<(DateTime<Utc>, f64)> = sqlx::query_as(
            r#"
            SELECT observed_at, price
            FROM observations
            WHERE search_query = ?1
            ORDER BY observed_at ASC, id ASC
            "#,
        )
        .bind(search_query)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(TrendSeries {
            search_query: search_query.to_string(),
            points: rows
                .into_iter()
                .map(|(observed_at, price)| TrendPoint { observed_at, price })
                .collect(),
        })
    }

    /// Most recent observations for a search term, newest first.
    pub async fn history(
        &self,
        search_query: &str,
        limit: usize,
    ) -> Result<Vec<Observation>, AppError> {
        let rows = sqlx::query_as::<_, ObservationRow>(
            r#"
            SELECT id, search_query, title, price, condition, link, observed_at
            FROM observations
            WHERE search_query = ?1
            ORDER BY observed_at DESC, id DESC
            LIMIT ?2
            "#,
        )
        .bind(search_query)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Check database connectivity.
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(())
    }
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct ObservationRow {
    id: i64,
    search_query: String,
    title: String,
    price: f64,
    condition: String,
    link: String,
    observed_at: DateTime<Utc>,
}

impl From<ObservationRow> for Observation {
    fn from(row: ObservationRow) -> Self {
        Observation {
            id: row.id,
            search_query: row.search_query,
            title: row.title,
            price: row.price,
            condition: row.condition,
            link: row.link,
            observed_at: row.observed_at,
        }
    }
}

// -- Trait implementation --

impl pricewatch_core::traits::ObservationStore for ObservationRepository {
    async fn append_batch(&self, search_query: &str, listings: &[Listing]) -> Result<u64, AppError> {
        ObservationRepository::append_batch(self, search_query, listings).await
    }

    async fn series_for(&self, search_query: &str) -> Result<TrendSeries, AppError> {
        ObservationRepository::series_for(self, search_query).await
    }
}
