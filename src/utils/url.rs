/// Build the request URL for a search term.
///
/// Plain concatenation, no percent-encoding: terms containing reserved
/// characters produce malformed URLs that come back from the fetch layer
/// as ordinary failures. Kept that way so `extract_search_term` stays an
/// exact inverse.
pub fn build_search_url(endpoint: &str, term: &str) -> String {
    format!("{}{}", endpoint, term)
}

/// Recover the search term from a request URL built by [`build_search_url`].
pub fn extract_search_term(url: &str, endpoint: &str) -> String {
    url.strip_prefix(endpoint).unwrap_or(url).to_string()
}

/// Extract domain from a URL string
/// Returns the host/domain portion without the scheme and path
/// Example: "https://github.com/foo/bar" -> Some("github.com")
pub fn extract_domain(url: &str) -> Option<String> {
    let url = url.trim();

    // Remove scheme if present
    let without_scheme = if let Some(idx) = url.find("://") {
        &url[idx + 3..]
    } else {
        url
    };

    // Extract host before path or query
    let host = without_scheme
        .split('/')
        .next()?
        .split('?')
        .next()?
        .split('#')
        .next()?;

    // Remove port if present
    let domain = host.split(':').next()?;

    if domain.is_empty() {
        None
    } else {
        Some(domain.to_string())
    }
}
