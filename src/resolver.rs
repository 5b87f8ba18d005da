//! Directory Resolver
//!
//! Maps display names to dashboard identifiers. Matching is exact and
//! case-sensitive; when several entries share a name the first one wins.

/// Anything listed by the dashboard with a display name and a stable id
pub trait Named {
    fn name(&self) -> &str;
    fn id(&self) -> &str;
}

/// Find the id of the first entry called `name`
pub fn find_id_by_name<'a, T: Named>(items: &'a [T], name: &str) -> Option<&'a str> {
    let mut matches = items.iter().filter(|item| item.name() == name);
    let first = matches.next()?;

    let duplicates = matches.count();
    if duplicates > 0 {
        tracing::debug!(
            "{} entries named {:?}; using the first ({})",
            duplicates + 1,
            name,
            first.id()
        );
    }

    Some(first.id())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Entry(&'static str, &'static str);

    impl Named for Entry {
        fn name(&self) -> &str {
            self.0
        }
        fn id(&self) -> &str {
            self.1
        }
    }

    #[test]
    fn test_finds_exact_match() {
        let items = [Entry("Branch", "N_1"), Entry("HQ", "N_2")];
        assert_eq!(find_id_by_name(&items, "HQ"), Some("N_2"));
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let items = [Entry("HQ", "N_2")];
        assert_eq!(find_id_by_name(&items, "hq"), None);
        assert_eq!(find_id_by_name(&items, "HQ "), None);
    }

    #[test]
    fn test_first_duplicate_wins() {
        let items = [Entry("HQ", "N_1"), Entry("HQ", "N_2")];
        assert_eq!(find_id_by_name(&items, "HQ"), Some("N_1"));
    }

    #[test]
    fn test_empty_list() {
        let items: [Entry; 0] = [];
        assert_eq!(find_id_by_name(&items, "HQ"), None);
    }
}
