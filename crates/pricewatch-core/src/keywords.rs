use std::collections::HashSet;
use std::path::Path;

/// Load an exclusion keyword list from a text file, one keyword per line.
///
/// Keywords are trimmed and lowercased; blank lines are dropped. A missing
/// or unreadable file is recovered locally as an empty set with a logged
/// warning — filtering then simply excludes nothing from that list.
pub fn load_keywords(path: &Path) -> HashSet<String> {
    match std::fs::read_to_string(path) {
        Ok(contents) => contents
            .lines()
            .map(|line| line.trim().to_lowercase())
            .filter(|line| !line.is_empty())
            .collect(),
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Keyword list not readable, excluding nothing"
            );
            HashSet::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn loads_lowercased_trimmed_keywords() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "  PS5\nsteelbook\n\n  Limited Edition  ").unwrap();

        let keywords = load_keywords(file.path());
        assert_eq!(keywords.len(), 3);
        assert!(keywords.contains("ps5"));
        assert!(keywords.contains("steelbook"));
        assert!(keywords.contains("limited edition"));
    }

    #[test]
    fn missing_file_yields_empty_set() {
        let keywords = load_keywords(Path::new("/nonexistent/filter_keywords.txt"));
        assert!(keywords.is_empty());
    }

    #[test]
    fn blank_file_yields_empty_set() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "\n   \n").unwrap();
        assert!(load_keywords(file.path()).is_empty());
    }
}
