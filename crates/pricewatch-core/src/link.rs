use url::Url;

/// Regional listing-item path prefix recognized for rewriting.
const REGIONAL_ITEM_PREFIX: &str = "https://www.ebay.de/itm/";

/// Canonical cross-region item path.
const CANONICAL_ITEM_BASE: &str = "https://www.ebay.com/itm/";

/// Normalize a listing URL to its stable cross-region form.
///
/// URLs rooted at the regional item path are rewritten to the canonical
/// domain with only the item identifier kept — tracking query parameters
/// are dropped. Anything else is returned unchanged, which also makes the
/// rewrite idempotent.
pub fn canonicalize_link(link: &str) -> String {
    if !link.starts_with(REGIONAL_ITEM_PREFIX) {
        return link.to_string();
    }
    let Ok(url) = Url::parse(link) else {
        return link.to_string();
    };
    let Some(mut segments) = url.path_segments() else {
        return link.to_string();
    };
    match (segments.next(), segments.next()) {
        (Some("itm"), Some(item_id)) if !item_id.is_empty() => {
            format!("{CANONICAL_ITEM_BASE}{item_id}")
        }
        _ => link.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_regional_item_link() {
        assert_eq!(
            canonicalize_link("https://www.ebay.de/itm/123456"),
            "https://www.ebay.com/itm/123456"
        );
    }

    #[test]
    fn drops_tracking_query_parameters() {
        assert_eq!(
            canonicalize_link("https://www.ebay.de/itm/123456?x=1&campid=foo"),
            "https://www.ebay.com/itm/123456"
        );
    }

    #[test]
    fn unrelated_links_pass_through() {
        assert_eq!(
            canonicalize_link("https://www.ebay.de/sch/i.html?_nkw=x"),
            "https://www.ebay.de/sch/i.html?_nkw=x"
        );
        assert_eq!(canonicalize_link("N/A"), "N/A");
        assert_eq!(canonicalize_link(""), "");
    }

    #[test]
    fn missing_item_id_passes_through() {
        assert_eq!(
            canonicalize_link("https://www.ebay.de/itm/"),
            "https://www.ebay.de/itm/"
        );
    }

    #[test]
    fn canonicalize_is_idempotent() {
        let urls = [
            "https://www.ebay.de/itm/123456?x=1",
            "https://www.ebay.com/itm/123456",
            "https://example.com/other",
            "not a url",
        ];
        for u in urls {
            let once = canonicalize_link(u);
            assert_eq!(canonicalize_link(&once), once);
        }
    }
}
