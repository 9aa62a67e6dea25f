use crate::error::AppError;
use crate::filter;
use crate::link::canonicalize_link;
use crate::models::{Listing, SearchConfig};
use crate::price::parse_price;
use crate::query::build_search_url;
use crate::throttle::ThrottleConfig;
use crate::traits::{Fetcher, ListingExtractor};

/// Drives one search session: paginate → extract → filter → normalize.
///
/// Generic over its collaborators via traits, enabling dependency injection
/// and testability with fixture markup instead of real HTTP.
pub struct SearchService<F, X>
where
    F: Fetcher,
    X: ListingExtractor,
{
    fetcher: F,
    extractor: X,
    throttle: ThrottleConfig,
}

impl<F, X> SearchService<F, X>
where
    F: Fetcher,
    X: ListingExtractor,
{
    /// Create a search service with the default inter-page throttle.
    pub fn new(fetcher: F, extractor: X) -> Self {
        Self {
            fetcher,
            extractor,
            throttle: ThrottleConfig::default(),
        }
    }

    /// Replace the inter-page delay policy (zero-delay in tests).
    pub fn with_throttle(mut self, throttle: ThrottleConfig) -> Self {
        self.throttle = throttle;
        self
    }

    /// Fetch all configured result pages for one query and assemble the
    /// validated listing set.
    ///
    /// Pages are fetched sequentially, 1 through `max_pages`, with a
    /// mandatory pause between them. A page whose fetch fails in transport
    /// contributes zero candidates and the session continues — only when
    /// every page fails does this surface as an empty result, which is
    /// still `Ok`.
    /// Candidates must contain the exact search term, hit no exclusion
    /// keyword or language, and carry a parseable price; survivors get
    /// their links canonicalized. Output order is page order, then
    /// in-page order; no deduplication.
    pub async fn search(&self, config: &SearchConfig) -> Result<Vec<Listing>, AppError> {
        let mut listings = Vec::new();
        let mut failed_pages = 0u32;

        for page in 1..=config.max_pages {
            if page > 1 {
                self.throttle.pause().await;
            }

            let url = build_search_url(config, page);
            tracing::info!(page, term = %config.search_term, "Fetching results page");

            let html = match self.fetcher.fetch(&url).await {
                Ok(html) => html,
                Err(e) if e.is_transport() => {
                    tracing::warn!(page, error = %e, "Page fetch failed, contributing zero candidates");
                    failed_pages += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            let candidates = self.extractor.extract(&html);
            tracing::debug!(page, count = candidates.len(), "Extracted candidates");

            for candidate in candidates {
                if !filter::accepts(
                    &candidate.title,
                    &config.search_term,
                    &config.exclude_keywords,
                    &config.exclude_languages,
                ) {
                    continue;
                }
                let Some(price) = parse_price(&candidate.price_text) else {
                    tracing::debug!(title = %candidate.title, "Dropping candidate with unparseable price");
                    continue;
                };
                listings.push(Listing {
                    title: candidate.title,
                    price,
                    condition: candidate.condition,
                    link: canonicalize_link(&candidate.link),
                });
            }
        }

        if failed_pages == config.max_pages && config.max_pages > 0 {
            tracing::warn!("Every page fetch failed, no items found");
        }
        tracing::info!(count = listings.len(), "Search complete");
        Ok(listings)
    }
}
