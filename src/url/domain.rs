use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host, it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_crawler::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Decides whether a URL belongs to the crawl's target host
///
/// An empty `base_domain` puts every parsable URL in scope. Otherwise the
/// parsed host must equal `base_domain` exactly: subdomains, other ports of
/// the same host and lookalike hosts are all out of scope. Unparsable URLs are
/// never in scope.
///
/// # Examples
///
/// ```
/// use site_crawler::url::in_scope;
///
/// assert!(in_scope("https://example.com/a", "example.com"));
/// assert!(!in_scope("https://blog.example.com/a", "example.com"));
/// assert!(in_scope("https://anything.test/", ""));
/// ```
pub fn in_scope(url: &str, base_domain: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };

    if base_domain.is_empty() {
        return true;
    }

    parsed.host_str() == Some(base_domain)
}
