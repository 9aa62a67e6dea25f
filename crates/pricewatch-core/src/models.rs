use std::collections::HashSet;

use chrono::{DateTime, Utc};

/// Sentinel for a card field whose element was absent in the markup.
pub const NOT_AVAILABLE: &str = "N/A";

/// Pages fetched per search unless overridden.
pub const DEFAULT_MAX_PAGES: u32 = 3;

/// One raw "item card" as extracted from a results page.
///
/// Fields may hold [`NOT_AVAILABLE`] — admissibility is decided
/// downstream by the filter and the price parser, not here.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingCandidate {
    pub title: String,
    pub price_text: String,
    pub condition: String,
    pub link: String,
}

impl ListingCandidate {
    /// A candidate with every field set to the sentinel, produced when a
    /// card matched structurally but none of its elements were located.
    pub fn unavailable() -> Self {
        Self {
            title: NOT_AVAILABLE.to_string(),
            price_text: NOT_AVAILABLE.to_string(),
            condition: NOT_AVAILABLE.to_string(),
            link: NOT_AVAILABLE.to_string(),
        }
    }
}

/// A validated listing: filtered, price parsed, link canonicalized.
///
/// This is what gets persisted — price is always present and numeric.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Listing {
    pub title: String,
    pub price: f64,
    pub condition: String,
    pub link: String,
}

/// One persisted price snapshot for a search term at a point in time.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Observation {
    pub id: i64,
    pub search_query: String,
    pub title: String,
    pub price: f64,
    pub condition: String,
    pub link: String,
    pub observed_at: DateTime<Utc>,
}

/// A single `(timestamp, price)` pair in a trend series.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct TrendPoint {
    pub observed_at: DateTime<Utc>,
    pub price: f64,
}

/// Time-ordered price observations for one search term.
///
/// Points are ordered by `observed_at` ascending. Multiple series may be
/// plotted on a shared axis; each keeps its own ordering independently.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TrendSeries {
    pub search_query: String,
    pub points: Vec<TrendPoint>,
}

impl TrendSeries {
    pub fn empty(search_query: impl Into<String>) -> Self {
        Self {
            search_query: search_query.into(),
            points: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}

/// Marketplace condition classification, keyed by the upstream numeric codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    New,
    LikeNew,
    VeryGood,
    Good,
    Acceptable,
}

impl Condition {
    /// The upstream query code for this condition.
    pub fn code(&self) -> &'static str {
        match self {
            Condition::New => "1000",
            Condition::LikeNew => "1500",
            Condition::VeryGood => "1750",
            Condition::Good => "2000",
            Condition::Acceptable => "2500",
        }
    }

    /// Map a single CLI selector ("1".."5") to a condition.
    pub fn from_selector(selector: &str) -> Option<Self> {
        match selector.trim() {
            "1" => Some(Condition::New),
            "2" => Some(Condition::LikeNew),
            "3" => Some(Condition::VeryGood),
            "4" => Some(Condition::Good),
            "5" => Some(Condition::Acceptable),
            _ => None,
        }
    }
}

/// Which item conditions a search is constrained to.
///
/// `All` is a distinguished value that omits the condition constraint from
/// the query entirely — it does not enumerate every code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionFilter {
    All,
    Only(Vec<Condition>),
}

impl ConditionFilter {
    /// Parse a comma-separated selector string ("1,3", "6", ...).
    ///
    /// Selector "6" anywhere means `All`. Unknown selectors are ignored;
    /// if nothing valid remains, the filter degrades to `All`.
    pub fn from_selectors(selectors: &str) -> Self {
        let parts: Vec<&str> = selectors.split(',').map(str::trim).collect();
        if parts.iter().any(|p| *p == "6") {
            return ConditionFilter::All;
        }
        let conditions: Vec<Condition> = parts
            .iter()
            .filter_map(|p| Condition::from_selector(p))
            .collect();
        if conditions.is_empty() {
            tracing::warn!(selectors, "No valid condition selectors, searching all conditions");
            ConditionFilter::All
        } else {
            ConditionFilter::Only(conditions)
        }
    }

    /// Comma-joined query codes, or `None` for the unconstrained case.
    pub fn codes(&self) -> Option<String> {
        match self {
            ConditionFilter::All => None,
            ConditionFilter::Only(conditions) => Some(
                conditions
                    .iter()
                    .map(|c| c.code())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
        }
    }
}

/// Constraint on listing lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    #[default]
    BuyNow,
    Completed,
    Sold,
}

impl SearchMode {
    /// Map a CLI selector ("1"/"2"/"3") to a mode.
    pub fn from_selector(selector: &str) -> Option<Self> {
        match selector.trim() {
            "1" => Some(SearchMode::BuyNow),
            "2" => Some(SearchMode::Completed),
            "3" => Some(SearchMode::Sold),
            _ => None,
        }
    }

    /// Like [`from_selector`](Self::from_selector), but an unrecognized
    /// selector falls back to `BuyNow` with a warning instead of failing.
    pub fn from_selector_or_default(selector: &str) -> Self {
        Self::from_selector(selector).unwrap_or_else(|| {
            tracing::warn!(selector, "Unknown search mode, falling back to buy-now");
            SearchMode::BuyNow
        })
    }

    /// Query-string modifier for this mode. Sold implies completed.
    pub fn query_modifier(&self) -> &'static str {
        match self {
            SearchMode::BuyNow => "&LH_BIN=1",
            SearchMode::Completed => "&LH_Complete=1",
            SearchMode::Sold => "&LH_Complete=1&LH_Sold=1",
        }
    }
}

/// Everything one search invocation needs — no process-wide state.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub search_term: String,
    pub conditions: ConditionFilter,
    pub exclude_keywords: HashSet<String>,
    pub exclude_languages: HashSet<String>,
    pub mode: SearchMode,
    pub max_pages: u32,
}

impl SearchConfig {
    pub fn new(search_term: impl Into<String>) -> Self {
        Self {
            search_term: search_term.into(),
            conditions: ConditionFilter::All,
            exclude_keywords: HashSet::new(),
            exclude_languages: HashSet::new(),
            mode: SearchMode::BuyNow,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    pub fn with_conditions(mut self, conditions: ConditionFilter) -> Self {
        self.conditions = conditions;
        self
    }

    pub fn with_exclude_keywords(mut self, keywords: HashSet<String>) -> Self {
        self.exclude_keywords = keywords;
        self
    }

    pub fn with_exclude_languages(mut self, languages: HashSet<String>) -> Self {
        self.exclude_languages = languages;
        self
    }

    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }
}
