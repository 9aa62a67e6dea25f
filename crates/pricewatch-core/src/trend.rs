use crate::error::AppError;
use crate::models::TrendSeries;
use crate::traits::ObservationStore;

/// Reads persisted observation history and shapes it for plotting.
pub struct TrendAggregator<S>
where
    S: ObservationStore,
{
    store: S,
}

impl<S> TrendAggregator<S>
where
    S: ObservationStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Time-ordered `(timestamp, price)` series for one search term.
    ///
    /// A term with no stored observations yields an empty series — a
    /// reportable outcome, not an error.
    pub async fn series_for(&self, search_query: &str) -> Result<TrendSeries, AppError> {
        let series = self.store.series_for(search_query).await?;
        if series.is_empty() {
            tracing::info!(term = search_query, "No stored observations for term");
        }
        Ok(series)
    }

    /// One series per requested term, each independently time-ordered.
    ///
    /// Series are not resampled or interpolated onto a common grid;
    /// consumers plot them on a shared axis as-is.
    pub async fn combined_series(&self, search_queries: &[String]) -> Result<Vec<TrendSeries>, AppError> {
        let mut combined = Vec::with_capacity(search_queries.len());
        for query in search_queries {
            combined.push(self.series_for(query).await?);
        }
        Ok(combined)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::models::{TrendPoint, TrendSeries};
    use crate::testutil::MockStore;

    fn series(query: &str, prices: &[(i64, f64)]) -> TrendSeries {
        TrendSeries {
            search_query: query.to_string(),
            points: prices
                .iter()
                .map(|&(ts, price)| TrendPoint {
                    observed_at: Utc.timestamp_opt(ts, 0).unwrap(),
                    price,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn series_for_returns_stored_points() {
        let store = MockStore::with_series(series("elden ring", &[(1000, 59.99), (2000, 49.99)]));
        let aggregator = TrendAggregator::new(store);

        let result = aggregator.series_for("elden ring").await.unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result.points[0].price, 59.99);
    }

    #[tokio::test]
    async fn unknown_term_yields_empty_series() {
        let aggregator = TrendAggregator::new(MockStore::empty());
        let result = aggregator.series_for("nonexistent").await.unwrap();
        assert!(result.is_empty());
        assert_eq!(result.search_query, "nonexistent");
    }

    #[tokio::test]
    async fn combined_series_maps_each_term_independently() {
        let store = MockStore::empty();
        store.insert_series(series("elden ring", &[(1000, 59.99)]));
        store.insert_series(series("dragonball", &[(1500, 19.99), (2500, 24.99)]));
        let aggregator = TrendAggregator::new(store);

        let queries = vec!["elden ring".to_string(), "dragonball".to_string(), "unknown".to_string()];
        let combined = aggregator.combined_series(&queries).await.unwrap();

        assert_eq!(combined.len(), 3);
        assert_eq!(combined[0].len(), 1);
        assert_eq!(combined[1].len(), 2);
        assert!(combined[2].is_empty());
    }
}
