/// Normalizes a URL into the canonical key used for deduplication
///
/// # Normalization Steps
///
/// 1. Remove the fragment (everything from the first `#`)
/// 2. Remove the trailing slash run, so `/page/` and `/page` collapse
///
/// The string is otherwise left untouched: no case folding, no query
/// reordering. A value that would be emptied or cut into its `scheme://`
/// separator by step 2 is kept as it was after step 1.
///
/// # Examples
///
/// ```
/// use site_crawler::url::normalize_url;
///
/// assert_eq!(normalize_url("https://example.com/page/#top"), "https://example.com/page");
/// assert_eq!(normalize_url("https://example.com/"), "https://example.com");
/// ```
pub fn normalize_url(url_str: &str) -> String {
    let without_fragment = match url_str.find('#') {
        Some(pos) => &url_str[..pos],
        None => url_str,
    };

    let trimmed = without_fragment.trim_end_matches('/');
    if trimmed.is_empty() || trimmed.ends_with(':') {
        return without_fragment.to_string();
    }

    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_fragment() {
        assert_eq!(
            normalize_url("https://example.com/page#section"),
            "https://example.com/page"
        );
    }

    #[test]
    fn test_remove_trailing_slash() {
        assert_eq!(
            normalize_url("https://example.com/page/"),
            "https://example.com/page"
        );
    }

    #[test]
    fn test_slash_run_removed() {
        assert_eq!(normalize_url("https://ex.com/a//"), "https://ex.com/a");
        assert_eq!(normalize_url("https://ex.com/a///#top"), "https://ex.com/a");
    }

    #[test]
    fn test_root_loses_slash() {
        assert_eq!(normalize_url("https://example.com/"), "https://example.com");
        assert_eq!(normalize_url("https://example.com"), "https://example.com");
    }

    #[test]
    fn test_fragment_then_slash() {
        assert_eq!(
            normalize_url("https://example.com/dir/#frag/"),
            "https://example.com/dir"
        );
    }

    #[test]
    fn test_query_kept() {
        assert_eq!(
            normalize_url("https://example.com/search?q=1#results"),
            "https://example.com/search?q=1"
        );
    }

    #[test]
    fn test_slash_and_no_slash_are_identical() {
        assert_eq!(
            normalize_url("https://example.com/b"),
            normalize_url("https://example.com/b/")
        );
    }

    #[test]
    fn test_degenerate_inputs_untouched() {
        assert_eq!(normalize_url("/"), "/");
        assert_eq!(normalize_url(""), "");
        assert_eq!(normalize_url("https://"), "https://");
        assert_eq!(normalize_url("#only"), "");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "https://example.com",
            "https://example.com/",
            "https://example.com//",
            "https://example.com/a/b/",
            "https://example.com/a/b//#x",
            "https://example.com/?q=1/",
            "https://",
            "https:///",
            "/",
            "//",
            "",
            "#",
            "relative/path/",
        ];

        for sample in samples {
            let once = normalize_url(sample);
            assert_eq!(normalize_url(&once), once, "not idempotent for {:?}", sample);
        }
    }
}
