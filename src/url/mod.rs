//! URL handling module for Site-Crawler
//!
//! This module provides URL normalization, link resolution, scope filtering
//! and start URL validation. Everything here is a pure function of its
//! inputs and can be called from any worker without synchronization.

mod domain;
mod normalize;
mod resolve;

use crate::{UrlError, UrlResult};
use url::Url;

// Re-export main functions
pub use domain::{extract_domain, in_scope};
pub use normalize::normalize_url;
pub use resolve::resolve_url;

/// Link prefixes that are never resolved or followed
pub const SKIPPED_SCHEMES: &[&str] = &["javascript:", "mailto:", "tel:", "data:"];

/// Returns true if a raw link target uses a scheme the crawler never follows
///
/// The match is a case-sensitive prefix match on the unmodified string.
pub fn has_skipped_scheme(link: &str) -> bool {
    SKIPPED_SCHEMES.iter().any(|scheme| link.starts_with(scheme))
}

/// Parses and validates the URL a crawl starts from
///
/// The start URL must be an absolute HTTP or HTTPS URL with a host.
///
/// # Examples
///
/// ```
/// use site_crawler::url::parse_start_url;
///
/// assert!(parse_start_url("https://example.com/").is_ok());
/// assert!(parse_start_url("example.com").is_err());
/// ```
pub fn parse_start_url(url_str: &str) -> UrlResult<Url> {
    let url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}
