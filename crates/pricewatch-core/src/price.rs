//! Localized price parsing and rendering.
//!
//! Upstream prices are German-localized strings ("1.234,56 €"): `.` as the
//! thousands separator, `,` as the decimal separator. Parsing normalizes
//! that into a plain f64; formatting renders it back for display/export.

use std::sync::LazyLock;

use regex::Regex;

/// Integer part plus an optional 2-digit fractional part.
static PRICE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(\.\d{2})?").expect("price pattern compiles"));

/// Extract the numeric price from a localized price string.
///
/// Strips the currency symbol, drops thousands separators, converts the
/// decimal separator, then takes the first maximal numeric match. Returns
/// `None` when no numeric pattern is present — a normal outcome for
/// placeholder texts like "N/A", not a fault.
pub fn parse_price(text: &str) -> Option<f64> {
    let normalized = text.replace('€', "").replace('.', "").replace(',', ".");
    let matched = PRICE_PATTERN.find(normalized.trim())?;
    matched.as_str().parse::<f64>().ok()
}

/// Render a price in the localized display form used by the export
/// artifact: thousands separated by `.`, decimals after `,`, trailing `€`.
pub fn format_price_de(price: f64) -> String {
    let plain = format!("{price:.2}");
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));
    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*c);
    }
    format!("{grouped},{frac_part} €")
}
