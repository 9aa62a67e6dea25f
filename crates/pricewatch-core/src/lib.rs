pub mod error;
pub mod filter;
pub mod keywords;
pub mod link;
pub mod models;
pub mod price;
pub mod query;
pub mod search;
pub mod testutil;
pub mod throttle;
pub mod traits;
pub mod trend;

pub use error::AppError;
pub use models::{
    Condition, ConditionFilter, Listing, ListingCandidate, Observation, SearchConfig, SearchMode,
    TrendPoint, TrendSeries, DEFAULT_MAX_PAGES, NOT_AVAILABLE,
};
pub use search::SearchService;
pub use throttle::ThrottleConfig;
pub use traits::{Fetcher, ListingExtractor, NullStore, ObservationStore};
pub use trend::TrendAggregator;
