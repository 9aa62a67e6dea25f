use std::future::Future;

use crate::error::AppError;
use crate::models::{Listing, ListingCandidate, TrendSeries};

/// Fetches raw HTML content from a URL.
pub trait Fetcher: Send + Sync + Clone {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, AppError>> + Send;
}

/// Produces raw listing candidates from one page of markup.
///
/// Absence of a field in a card yields the sentinel, never a fault; a page
/// with no cards yields an empty vec.
pub trait ListingExtractor: Send + Sync + Clone {
    fn extract(&self, html: &str) -> Vec<ListingCandidate>;
}

/// Persists and retrieves price observations.
pub trait ObservationStore: Send + Sync + Clone {
    /// Append one row per listing for `search_query`, all stamped with the
    /// insertion time, as a single transactional unit. Returns the number
    /// of rows written. Pure append — history accumulates across calls.
    fn append_batch(
        &self,
        search_query: &str,
        listings: &[Listing],
    ) -> impl Future<Output = Result<u64, AppError>> + Send;

    /// All observations for `search_query` as `(timestamp, price)` pairs,
    /// ordered by timestamp ascending. An unknown query yields an empty
    /// series, not an error.
    fn series_for(
        &self,
        search_query: &str,
    ) -> impl Future<Output = Result<TrendSeries, AppError>> + Send;
}

/// A no-op ObservationStore for use when persistence is not needed.
#[derive(Debug, Clone)]
pub struct NullStore;

impl ObservationStore for NullStore {
    async fn append_batch(&self, _search_query: &str, _listings: &[Listing]) -> Result<u64, AppError> {
        Ok(0)
    }

    async fn series_for(&self, search_query: &str) -> Result<TrendSeries, AppError> {
        Ok(TrendSeries::empty(search_query))
    }
}
