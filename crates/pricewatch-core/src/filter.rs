use std::collections::HashSet;

/// Decide whether a candidate title matches the search intent.
///
/// Three pure case-insensitive substring tests — no tokenization, no
/// stemming: the exact search term must appear in the title, and none of
/// the exclusion keywords or exclusion languages may appear. Exclusion
/// sets are expected to be lowercase (see [`crate::keywords`]).
pub fn accepts(
    title: &str,
    search_term: &str,
    exclude_keywords: &HashSet<String>,
    exclude_languages: &HashSet<String>,
) -> bool {
    let title_lower = title.to_lowercase();
    if !title_lower.contains(&search_term.to_lowercase()) {
        return false;
    }
    if exclude_keywords.iter().any(|kw| title_lower.contains(kw.as_str())) {
        return false;
    }
    if exclude_languages.iter().any(|lang| title_lower.contains(lang.as_str())) {
        return false;
    }
    true
}
