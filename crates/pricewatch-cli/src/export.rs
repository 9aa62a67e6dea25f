//! The export artifact: a CSV sorted by title then ascending price, with
//! prices re-rendered in localized display form, plus summary statistics
//! over the numeric prices.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pricewatch_core::models::Listing;
use pricewatch_core::price::format_price_de;

#[derive(serde::Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "Titel")]
    title: &'a str,
    #[serde(rename = "Preis")]
    price: String,
    #[serde(rename = "Zustand")]
    condition: &'a str,
    #[serde(rename = "Inserat Link")]
    link: &'a str,
}

/// Summary statistics over the numeric (pre-formatting) prices.
#[derive(Debug, PartialEq)]
pub struct PriceSummary {
    pub median: f64,
    pub lowest: f64,
    pub highest: f64,
}

/// Median, min, and max price of a batch. `None` for an empty batch.
pub fn summarize(listings: &[Listing]) -> Option<PriceSummary> {
    if listings.is_empty() {
        return None;
    }
    let mut prices: Vec<f64> = listings.iter().map(|l| l.price).collect();
    prices.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let mid = prices.len() / 2;
    let median = if prices.len() % 2 == 0 {
        (prices[mid - 1] + prices[mid]) / 2.0
    } else {
        prices[mid]
    };

    Some(PriceSummary {
        median,
        lowest: prices[0],
        highest: prices[prices.len() - 1],
    })
}

/// Listings ordered for export: title alphabetically, then price ascending.
fn sorted_for_export(listings: &[Listing]) -> Vec<&Listing> {
    let mut sorted: Vec<&Listing> = listings.iter().collect();
    sorted.sort_by(|a, b| {
        a.title
            .cmp(&b.title)
            .then(a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal))
    });
    sorted
}

/// Write the batch as a CSV file with localized display prices.
pub fn write_csv(path: &Path, listings: &[Listing]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

    for listing in sorted_for_export(listings) {
        writer.serialize(ExportRow {
            title: &listing.title,
            price: format_price_de(listing.price),
            condition: &listing.condition,
            link: &listing.link,
        })?;
    }

    writer.flush().context("Failed to flush CSV file")?;
    Ok(())
}

/// Derive the default CSV filename from the query and condition selectors.
pub fn default_csv_path(search_term: &str, condition_selectors: &str) -> PathBuf {
    PathBuf::from(format!(
        "pricewatch_{}_{}.csv",
        search_term.trim().replace(' ', "_"),
        condition_selectors.replace(',', "_")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(title: &str, price: f64) -> Listing {
        Listing {
            title: title.to_string(),
            price,
            condition: "Neu".to_string(),
            link: "https://www.ebay.com/itm/1".to_string(),
        }
    }

    #[test]
    fn median_of_odd_batch_is_the_middle_price() {
        let batch = vec![listing("a", 30.0), listing("b", 10.0), listing("c", 20.0)];
        let summary = summarize(&batch).unwrap();
        assert_eq!(summary.median, 20.0);
        assert_eq!(summary.lowest, 10.0);
        assert_eq!(summary.highest, 30.0);
    }

    #[test]
    fn median_of_even_batch_averages_the_middle_pair() {
        let batch = vec![listing("a", 10.0), listing("b", 20.0), listing("c", 30.0), listing("d", 40.0)];
        assert_eq!(summarize(&batch).unwrap().median, 25.0);
    }

    #[test]
    fn empty_batch_has_no_summary() {
        assert!(summarize(&[]).is_none());
    }

    #[test]
    fn export_sorts_by_title_then_ascending_price() {
        let batch = vec![
            listing("Zelda", 50.0),
            listing("Elden Ring", 70.0),
            listing("Elden Ring", 60.0),
        ];
        let sorted = sorted_for_export(&batch);
        assert_eq!(sorted[0].title, "Elden Ring");
        assert_eq!(sorted[0].price, 60.0);
        assert_eq!(sorted[1].price, 70.0);
        assert_eq!(sorted[2].title, "Zelda");
    }

    #[test]
    fn csv_contains_localized_prices_and_german_headers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_csv(&path, &[listing("Elden Ring PS5", 1234.56)]).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("Titel,Preis,Zustand,Inserat Link"));
        assert!(contents.contains("\"1.234,56 €\""));
        assert!(contents.contains("Elden Ring PS5"));
    }

    #[test]
    fn default_csv_path_encodes_query_and_conditions() {
        assert_eq!(
            default_csv_path("elden ring", "1,2"),
            PathBuf::from("pricewatch_elden_ring_1_2.csv")
        );
    }
}
