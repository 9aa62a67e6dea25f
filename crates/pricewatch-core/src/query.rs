use crate::models::SearchConfig;

/// Regional search endpoint.
const SEARCH_BASE: &str = "https://www.ebay.de/sch/i.html";

/// Video games category.
const CATEGORY: &str = "139973";

/// Item location constraint: Germany.
const LOCATION: &str = "&_stpos=0&LH_PrefLoc=2";

/// Build the search URL for one results page.
///
/// Conditions are joined as a comma-separated code list; the unconstrained
/// filter omits the parameter entirely. Mode modifiers are mutually
/// exclusive and appended as-is.
pub fn build_search_url(config: &SearchConfig, page: u32) -> String {
    let term = config.search_term.trim().replace(' ', "+");
    let mut url = format!("{SEARCH_BASE}?_nkw={term}&rt=nc");
    if let Some(codes) = config.conditions.codes() {
        url.push_str("&LH_ItemCondition=");
        url.push_str(&codes);
    }
    url.push_str(config.mode.query_modifier());
    url.push_str(&format!("&_sacat={CATEGORY}&_pgn={page}{LOCATION}"));
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Condition, ConditionFilter, SearchMode};

    #[test]
    fn buy_now_all_conditions_page_one() {
        let config = SearchConfig::new("elden ring");
        let url = build_search_url(&config, 1);
        assert_eq!(
            url,
            "https://www.ebay.de/sch/i.html?_nkw=elden+ring&rt=nc&LH_BIN=1\
             &_sacat=139973&_pgn=1&_stpos=0&LH_PrefLoc=2"
        );
    }

    #[test]
    fn condition_codes_are_joined() {
        let config = SearchConfig::new("x")
            .with_conditions(ConditionFilter::Only(vec![Condition::New, Condition::Good]));
        let url = build_search_url(&config, 1);
        assert!(url.contains("&LH_ItemCondition=1000,2000"));
    }

    #[test]
    fn all_conditions_omit_the_parameter() {
        let config = SearchConfig::new("x");
        assert!(!build_search_url(&config, 1).contains("LH_ItemCondition"));
    }

    #[test]
    fn sold_mode_sets_completed_and_sold() {
        let config = SearchConfig::new("x").with_mode(SearchMode::Sold);
        let url = build_search_url(&config, 1);
        assert!(url.contains("&LH_Complete=1&LH_Sold=1"));
        assert!(!url.contains("LH_BIN"));
    }

    #[test]
    fn completed_mode_does_not_imply_sold() {
        let config = SearchConfig::new("x").with_mode(SearchMode::Completed);
        let url = build_search_url(&config, 1);
        assert!(url.contains("&LH_Complete=1"));
        assert!(!url.contains("LH_Sold"));
    }

    #[test]
    fn page_number_is_appended() {
        let config = SearchConfig::new("x");
        assert!(build_search_url(&config, 3).contains("&_pgn=3"));
    }

    #[test]
    fn spaces_in_term_are_encoded() {
        let config = SearchConfig::new("  dragon ball z  ");
        assert!(build_search_url(&config, 1).contains("_nkw=dragon+ball+z&"));
    }
}
