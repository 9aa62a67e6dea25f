use pricewatch_core::error::AppError;
use pricewatch_core::models::{ListingCandidate, NOT_AVAILABLE};
use pricewatch_core::traits::ListingExtractor;
use scraper::{ElementRef, Html, Selector};

/// CSS-selector listing extractor using the `scraper` crate.
///
/// Walks the `.s-item` cards of a results page and reads title, price,
/// condition, and link with fixed selectors. A field whose element is
/// absent becomes the [`NOT_AVAILABLE`] sentinel — admissibility is
/// decided downstream, never here.
#[derive(Clone)]
pub struct ScraperExtractor {
    card: Selector,
    title: Selector,
    price: Selector,
    link: Selector,
    condition: Selector,
}

impl ScraperExtractor {
    pub fn new() -> Result<Self, AppError> {
        Ok(Self {
            card: parse_selector(".s-item")?,
            title: parse_selector(".s-item__title")?,
            price: parse_selector(".s-item__price")?,
            link: parse_selector(".s-item__link")?,
            condition: parse_selector(".SECONDARY_INFO")?,
        })
    }
}

fn parse_selector(selector: &str) -> Result<Selector, AppError> {
    Selector::parse(selector).map_err(|e| AppError::SelectorError(e.to_string()))
}

/// First matching descendant's text, trimmed, or the sentinel.
fn text_or_sentinel(card: ElementRef<'_>, selector: &Selector) -> String {
    card.select(selector)
        .next()
        .map(|node| node.text().collect::<String>().trim().to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// First matching descendant's attribute, or the sentinel.
fn attr_or_sentinel(card: ElementRef<'_>, selector: &Selector, attr: &str) -> String {
    card.select(selector)
        .next()
        .and_then(|node| node.value().attr(attr))
        .map(str::to_string)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

impl ListingExtractor for ScraperExtractor {
    fn extract(&self, html: &str) -> Vec<ListingCandidate> {
        let document = Html::parse_document(html);
        let candidates: Vec<ListingCandidate> = document
            .select(&self.card)
            .map(|card| ListingCandidate {
                title: text_or_sentinel(card, &self.title),
                price_text: text_or_sentinel(card, &self.price),
                condition: text_or_sentinel(card, &self.condition),
                link: attr_or_sentinel(card, &self.link, "href"),
            })
            .collect();
        tracing::debug!(count = candidates.len(), "Extracted item cards from page");
        candidates
    }
}
