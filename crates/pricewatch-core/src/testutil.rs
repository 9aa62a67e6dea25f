//! Test utilities: mock implementations of the core traits.
//!
//! Handwritten mocks for dependency injection in unit tests.
//! All mocks use `Arc<Mutex<_>>` for interior mutability, allowing
//! test assertions on recorded calls.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::AppError;
use crate::models::{Listing, ListingCandidate, TrendSeries};
use crate::traits::{Fetcher, ListingExtractor, ObservationStore};

// ---------------------------------------------------------------------------
// MockFetcher
// ---------------------------------------------------------------------------

/// Mock fetcher that returns a configurable response queue.
#[derive(Clone)]
pub struct MockFetcher {
    /// Each call pops the first element. If empty, returns a default page.
    responses: Arc<Mutex<Vec<Result<String, AppError>>>>,
    /// URLs seen, in call order.
    pub requested: Arc<Mutex<Vec<String>>>,
}

impl MockFetcher {
    pub fn new(html: &str) -> Self {
        Self::with_responses(vec![Ok(html.to_string())])
    }

    pub fn with_error(error: AppError) -> Self {
        Self::with_responses(vec![Err(error)])
    }

    pub fn with_responses(responses: Vec<Result<String, AppError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            requested: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String, AppError> {
        self.requested.lock().unwrap().push(url.to_string());
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok("<html><body>default</body></html>".to_string())
        } else {
            responses.remove(0)
        }
    }
}

// ---------------------------------------------------------------------------
// MockExtractor
// ---------------------------------------------------------------------------

/// Mock extractor that yields scripted candidates per page.
#[derive(Clone)]
pub struct MockExtractor {
    /// Each call pops the first page's candidates. If empty, yields none.
    pages: Arc<Mutex<Vec<Vec<ListingCandidate>>>>,
}

impl MockExtractor {
    pub fn with_pages(pages: Vec<Vec<ListingCandidate>>) -> Self {
        Self {
            pages: Arc::new(Mutex::new(pages)),
        }
    }

    pub fn empty() -> Self {
        Self::with_pages(Vec::new())
    }
}

impl ListingExtractor for MockExtractor {
    fn extract(&self, _html: &str) -> Vec<ListingCandidate> {
        let mut pages = self.pages.lock().unwrap();
        if pages.is_empty() {
            Vec::new()
        } else {
            pages.remove(0)
        }
    }
}

// ---------------------------------------------------------------------------
// MockStore
// ---------------------------------------------------------------------------

/// Recorded append: (search_query, listings).
pub type AppendedBatch = (String, Vec<Listing>);

/// Mock store that records appends and serves configurable series.
#[derive(Clone)]
pub struct MockStore {
    pub appended: Arc<Mutex<Vec<AppendedBatch>>>,
    series: Arc<Mutex<HashMap<String, TrendSeries>>>,
    append_error: Arc<Mutex<Option<AppError>>>,
}

impl MockStore {
    /// Empty store — no history, appends succeed.
    pub fn empty() -> Self {
        Self {
            appended: Arc::new(Mutex::new(Vec::new())),
            series: Arc::new(Mutex::new(HashMap::new())),
            append_error: Arc::new(Mutex::new(None)),
        }
    }

    /// Store preloaded with one series.
    pub fn with_series(series: TrendSeries) -> Self {
        let store = Self::empty();
        store.insert_series(series);
        store
    }

    /// Store whose next append fails.
    pub fn with_append_error(error: AppError) -> Self {
        let store = Self::empty();
        *store.append_error.lock().unwrap() = Some(error);
        store
    }

    pub fn insert_series(&self, series: TrendSeries) {
        self.series
            .lock()
            .unwrap()
            .insert(series.search_query.clone(), series);
    }
}

impl ObservationStore for MockStore {
    async fn append_batch(&self, search_query: &str, listings: &[Listing]) -> Result<u64, AppError> {
        let mut err = self.append_error.lock().unwrap();
        if let Some(e) = err.take() {
            return Err(e);
        }
        self.appended
            .lock()
            .unwrap()
            .push((search_query.to_string(), listings.to_vec()));
        Ok(listings.len() as u64)
    }

    async fn series_for(&self, search_query: &str) -> Result<TrendSeries, AppError> {
        Ok(self
            .series
            .lock()
            .unwrap()
            .get(search_query)
            .cloned()
            .unwrap_or_else(|| TrendSeries::empty(search_query)))
    }
}
