use crate::{UrlError, UrlResult};
use url::Url;

/// Resolves a link target against the URL of the page it was found on
///
/// # Resolution Rules
///
/// | Candidate | Result |
/// |-----------|--------|
/// | contains `://` | parsed on its own and returned in serialized form |
/// | `//host/path` | takes the base scheme |
/// | `/path` | replaces the whole base path |
/// | `path` | appended to the base path minus its last segment |
/// | `?query` | base path with the new query |
/// | empty | the base URL itself |
///
/// The base query and fragment never leak into the result. Relative paths
/// are merged as strings: `.` and `..` segments are kept, not collapsed.
///
/// # Errors
///
/// * `UrlError::Parse` - an absolute candidate does not parse
/// * `UrlError::Unresolvable` - the base is not a valid URL with a host, or
///   the merged URL does not parse
///
/// # Examples
///
/// ```
/// use site_crawler::url::resolve_url;
///
/// let base = "https://example.com/docs/intro.html";
/// assert_eq!(resolve_url(base, "setup.html").unwrap(), "https://example.com/docs/setup.html");
/// assert_eq!(resolve_url(base, "/about").unwrap(), "https://example.com/about");
/// ```
pub fn resolve_url(base: &str, candidate: &str) -> UrlResult<String> {
    if candidate.contains("://") {
        let absolute = Url::parse(candidate).map_err(|e| UrlError::Parse(e.to_string()))?;
        return Ok(absolute.to_string());
    }

    let unresolvable = || UrlError::Unresolvable {
        base: base.to_string(),
        candidate: candidate.to_string(),
    };

    let mut resolved = Url::parse(base).map_err(|_| unresolvable())?;
    if resolved.cannot_be_a_base() {
        return Err(unresolvable());
    }
    resolved.set_fragment(None);

    if candidate.is_empty() {
        return Ok(resolved.to_string());
    }

    if candidate.starts_with("//") {
        let absolute = format!("{}:{}", resolved.scheme(), candidate);
        return Url::parse(&absolute)
            .map(|url| url.to_string())
            .map_err(|_| unresolvable());
    }

    let origin = origin_of(&resolved).ok_or_else(unresolvable)?;

    let (rest, fragment) = match candidate.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment)),
        None => (candidate, None),
    };
    let (path_part, query) = match rest.split_once('?') {
        Some((path_part, query)) => (path_part, Some(query)),
        None => (rest, None),
    };

    // Dot segments are kept as written; the merged string is the visited key.
    let path = if path_part.is_empty() {
        resolved.path().to_string()
    } else if path_part.starts_with('/') {
        path_part.to_string()
    } else {
        format!("{}{}", directory_of(resolved.path()), path_part)
    };

    let mut merged = format!("{}{}", origin, path);

    // A bare fragment keeps the page exactly as it is
    let query = if rest.is_empty() { resolved.query() } else { query };
    if let Some(query) = query {
        merged.push('?');
        merged.push_str(query);
    }
    if let Some(fragment) = fragment {
        merged.push('#');
        merged.push_str(fragment);
    }

    Url::parse(&merged).map_err(|_| unresolvable())?;
    Ok(merged)
}

/// Returns `scheme://host[:port]` of a URL, or `None` when it has no host
fn origin_of(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    })
}

/// Returns the path up to and including its last `/`
fn directory_of(path: &str) -> &str {
    match path.rfind('/') {
        Some(pos) => &path[..=pos],
        None => "/",
    }
}
