use crate::utils::url::extract_search_term;

/// How far back the quick-repeat bar looks: a window of six terms, the
/// newest of which is the in-flight search and is not shown.
const WINDOW: usize = 6;

/// Derive the quick-repeat terms from the request URLs issued so far
/// (oldest first). Stateless: the same URL history always yields the same
/// result.
///
/// Consecutive duplicates are collapsed; a term searched again later still
/// shows up twice. The trailing entry is the current search and is dropped,
/// leaving at most five prior terms, oldest of the window first.
pub fn last_searches(urls: &[String], endpoint: &str) -> Vec<String> {
    let collapsed = urls.iter().fold(Vec::new(), |mut terms: Vec<String>, url| {
        let term = extract_search_term(url, endpoint);
        if terms.last() != Some(&term) {
            terms.push(term);
        }
        terms
    });

    if collapsed.is_empty() {
        return Vec::new();
    }

    let end = collapsed.len() - 1;
    let start = collapsed.len().saturating_sub(WINDOW);
    collapsed[start..end].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENDPOINT: &str = "https://hn.algolia.com/api/v1/search?query=";

    fn url(term: &str) -> String {
        format!("{}{}", ENDPOINT, term)
    }

    #[test]
    fn test_empty_history() {
        assert!(last_searches(&[], ENDPOINT).is_empty());
    }

    #[test]
    fn test_only_current_search() {
        let urls = vec![url("react")];
        assert!(last_searches(&urls, ENDPOINT).is_empty());
    }

    #[test]
    fn test_consecutive_duplicates_collapse() {
        let urls = vec![url("a"), url("a"), url("b"), url("c")];
        assert_eq!(last_searches(&urls, ENDPOINT), vec!["a", "b"]);
    }

    #[test]
    fn test_non_adjacent_repeats_survive() {
        let urls = vec![url("a"), url("b"), url("a"), url("c")];
        assert_eq!(last_searches(&urls, ENDPOINT), vec!["a", "b", "a"]);
    }

    #[test]
    fn test_window_keeps_five_before_current() {
        let urls: Vec<String> = ["t1", "t2", "t3", "t4", "t5", "t6", "t7", "t8"]
            .iter()
            .map(|t| url(t))
            .collect();

        // The five immediately preceding the current term, oldest first.
        assert_eq!(
            last_searches(&urls, ENDPOINT),
            vec!["t3", "t4", "t5", "t6", "t7"]
        );
    }

    #[test]
    fn test_idempotent_for_same_history() {
        let urls = vec![url("rust"), url("go"), url("zig")];
        let first = last_searches(&urls, ENDPOINT);
        let second = last_searches(&urls, ENDPOINT);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_term_is_a_term() {
        // Submitting an empty search is allowed and tracked like any other.
        let urls = vec![url(""), url("rust")];
        assert_eq!(last_searches(&urls, ENDPOINT), vec![""]);
    }
}
