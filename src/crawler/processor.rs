//! Per-URL unit of work
//!
//! The page processor fetches one frontier entry, extracts its title and
//! links, turns the links into admission candidates and hands them to the
//! frontier as one batch. Every failure is folded into the returned
//! `CrawlResult`; nothing here can take a worker down.

use crate::crawler::fetcher::Fetcher;
use crate::crawler::frontier::{Frontier, FrontierEntry};
use crate::crawler::parser::Extractor;
use crate::url::{has_skipped_scheme, in_scope, normalize_url, resolve_url};
use std::sync::Arc;

/// Outcome of one attempted fetch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlResult {
    /// Normalized URL that was fetched
    pub url: String,

    /// Page title (empty on failure or when the page has none)
    pub title: String,

    /// HTTP status code, 0 for a transport failure
    pub status: u16,

    /// Number of raw link targets on the page, before any filtering
    pub link_count: usize,

    /// Transport error message, empty when an HTTP exchange completed
    pub error: String,

    /// Page that first linked here (empty for the seed)
    pub referrer_url: String,

    /// Title of that page
    pub referrer_title: String,
}

impl CrawlResult {
    /// Returns true if no HTTP exchange completed
    pub fn is_transport_failure(&self) -> bool {
        self.status == 0
    }

    /// Returns true if the server answered with a 4xx or 5xx status
    pub fn is_http_error(&self) -> bool {
        self.status >= 400
    }
}

/// Turns a page's raw link targets into admission candidates
///
/// # Filtering Steps
///
/// For each raw target, in document order:
/// 1. Skip `javascript:`, `mailto:`, `tel:` and `data:` targets as written
/// 2. Resolve against `page_url`; skip on failure
/// 3. Normalize the resolved URL
/// 4. Skip it unless it is in scope for `base_domain`
///
/// Duplicates are kept; the frontier's visited set drops them.
///
/// # Example
///
/// ```
/// use site_crawler::crawler::admissible_links;
///
/// let links = vec![
///     "/b/".to_string(),
///     "mailto:a@b.com".to_string(),
///     "https://other.example/x".to_string(),
/// ];
/// let candidates = admissible_links("https://example.com/a", &links, "example.com");
/// assert_eq!(candidates, vec!["https://example.com/b".to_string()]);
/// ```
pub fn admissible_links(page_url: &str, links: &[String], base_domain: &str) -> Vec<String> {
    links
        .iter()
        .filter_map(|link| {
            if has_skipped_scheme(link) {
                tracing::trace!("Skipping {} (scheme)", link);
                return None;
            }

            let resolved = match resolve_url(page_url, link) {
                Ok(resolved) => resolved,
                Err(e) => {
                    tracing::debug!("Dropping link {:?} on {}: {}", link, page_url, e);
                    return None;
                }
            };

            let normalized = normalize_url(&resolved);
            if !in_scope(&normalized, base_domain) {
                tracing::trace!("Skipping {} (out of scope)", normalized);
                return None;
            }

            Some(normalized)
        })
        .collect()
}

/// Fetches pages and feeds their links back into the frontier
pub struct PageProcessor {
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn Extractor>,
    frontier: Arc<Frontier>,
    base_domain: String,
}

impl PageProcessor {
    /// Creates a processor for one crawl run
    ///
    /// # Arguments
    ///
    /// * `fetcher` - HTTP collaborator
    /// * `extractor` - HTML collaborator
    /// * `frontier` - Frontier that receives admission batches
    /// * `base_domain` - Host links must match; empty to follow everything
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        extractor: Arc<dyn Extractor>,
        frontier: Arc<Frontier>,
        base_domain: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            frontier,
            base_domain: base_domain.into(),
        }
    }

    /// Processes one frontier entry
    ///
    /// # Processing Flow
    ///
    /// 1. Fetch the entry's URL
    ///    - Transport failure → status 0, error message, no links
    /// 2. Record status and title; link count is the raw target count
    /// 3. Filter the targets with `admissible_links`
    /// 4. Submit the survivors to the frontier as one batch
    ///
    /// The caller records the returned result and reports completion.
    pub async fn process(&self, entry: &FrontierEntry) -> CrawlResult {
        let url = entry.url.as_str();
        let mut result = CrawlResult {
            url: url.to_string(),
            referrer_url: entry.referrer_url.clone(),
            referrer_title: entry.referrer_title.clone(),
            ..CrawlResult::default()
        };

        let response = match self.fetcher.fetch(url).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Failed to fetch {}: {}", url, e);
                result.error = e.message;
                return result;
            }
        };

        if response.effective_url != url {
            tracing::debug!("{} redirected to {}", url, response.effective_url);
        }

        let parsed = self.extractor.extract(&response.body);
        result.status = response.status;
        result.title = parsed.title;
        result.link_count = parsed.links.len();

        let batch: Vec<FrontierEntry> = admissible_links(url, &parsed.links, &self.base_domain)
            .into_iter()
            .map(|candidate| FrontierEntry {
                url: candidate,
                referrer_url: url.to_string(),
                referrer_title: result.title.clone(),
            })
            .collect();

        let offered = batch.len();
        let queued = self.frontier.admit(batch);

        tracing::debug!(
            "Processed {} (status {}, {} links, {} in scope, {} queued)",
            url,
            result.status,
            result.link_count,
            offered,
            queued
        );

        result
    }
}
