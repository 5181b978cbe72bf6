//! Crawler coordinator - worker pool and crawl lifecycle
//!
//! This module wires one crawl run together:
//! - Validating the start URL and deriving the base domain
//! - Seeding the frontier
//! - Spawning a fixed pool of workers that drain the frontier
//! - Reporting progress and joining the workers once they terminate
//! - Handing the collected results back to the caller

use crate::config::{validate, Config, CrawlerConfig};
use crate::crawler::fetcher::{Fetcher, HttpFetcher};
use crate::crawler::frontier::{Dequeued, Frontier, FrontierEntry, Termination};
use crate::crawler::parser::{Extractor, HtmlExtractor};
use crate::crawler::processor::{CrawlResult, PageProcessor};
use crate::output::ResultSink;
use crate::url::{extract_domain, normalize_url, parse_start_url};
use crate::{ConfigError, CrawlerError};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;

/// Pages between two progress log lines
const PROGRESS_INTERVAL: usize = 10;

/// Cloneable handle that asks a running crawl to stop
///
/// Workers finish the page they are processing, then exit without taking
/// further entries from the frontier. Results recorded so far are kept.
#[derive(Debug, Clone)]
pub struct StopHandle {
    frontier: Arc<Frontier>,
}

impl StopHandle {
    /// Requests the crawl to stop
    pub fn stop(&self) {
        tracing::info!("Stop requested, waiting for in-flight pages");
        self.frontier.request_stop();
    }

    /// Returns true once a stop has been requested
    pub fn is_stopped(&self) -> bool {
        self.frontier.is_stopped()
    }
}

/// Requests a stop if the owning worker unwinds
///
/// A worker that panics mid-page never reports completion, so the others
/// would wait on it forever.
struct StopOnPanic<'a>(&'a Frontier);

impl Drop for StopOnPanic<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.0.request_stop();
        }
    }
}

/// One crawl run, ready to be started
pub struct Crawler {
    workers: usize,
    start_url: String,
    base_domain: String,
    frontier: Arc<Frontier>,
    processor: Arc<PageProcessor>,
}

impl Crawler {
    /// Creates a crawler that fetches over HTTP and parses HTML
    ///
    /// # Arguments
    ///
    /// * `config` - The full crawler configuration
    /// * `start_url` - Absolute HTTP or HTTPS URL to start from
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Crawler ready to run
    /// * `Err(CrawlerError)` - Invalid configuration, start URL or HTTP client
    pub fn new(config: &Config, start_url: &str) -> crate::Result<Self> {
        validate(config)?;

        let fetcher = HttpFetcher::new(&config.http)?;
        Self::with_collaborators(
            &config.crawler,
            start_url,
            Arc::new(fetcher),
            Arc::new(HtmlExtractor),
        )
    }

    /// Creates a crawler around caller-supplied fetch and extract collaborators
    ///
    /// # Arguments
    ///
    /// * `config` - Worker count, page budget and scope setting
    /// * `start_url` - Absolute HTTP or HTTPS URL to start from
    /// * `fetcher` - Performs the GET for each page
    /// * `extractor` - Pulls the title and raw links out of each body
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Crawler with the normalized start URL seeded
    /// * `Err(CrawlerError)` - Start URL rejected or zero workers requested
    pub fn with_collaborators(
        config: &CrawlerConfig,
        start_url: &str,
        fetcher: Arc<dyn Fetcher>,
        extractor: Arc<dyn Extractor>,
    ) -> crate::Result<Self> {
        if config.workers == 0 {
            return Err(ConfigError::Validation("workers must be at least 1".to_string()).into());
        }

        let parsed = parse_start_url(start_url).map_err(|source| CrawlerError::InvalidStartUrl {
            url: start_url.to_string(),
            source,
        })?;

        // Scope is checked against the parsed host, which the url crate
        // lowercases for http and https.
        let base_domain = if config.same_domain {
            extract_domain(&parsed).unwrap_or_default()
        } else {
            String::new()
        };

        let start_url = normalize_url(parsed.as_str());
        let frontier = Arc::new(Frontier::new(config.max_pages));
        frontier.seed(FrontierEntry::seed(start_url.clone()));

        let processor = Arc::new(PageProcessor::new(
            fetcher,
            extractor,
            Arc::clone(&frontier),
            base_domain.clone(),
        ));

        Ok(Self {
            workers: config.workers,
            start_url,
            base_domain,
            frontier,
            processor,
        })
    }

    /// Normalized start URL the frontier was seeded with
    pub fn start_url(&self) -> &str {
        &self.start_url
    }

    /// Host links must match, empty when every host is in scope
    pub fn base_domain(&self) -> &str {
        &self.base_domain
    }

    /// Returns a handle that can stop this crawl from another task
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            frontier: Arc::clone(&self.frontier),
        }
    }

    /// Runs the crawl to completion
    ///
    /// Spawns the worker pool and waits for every worker to exit. Workers
    /// exit once a stop is requested, the page budget is spent, or the
    /// frontier is empty with no worker left that could refill it.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<CrawlResult>)` - One result per fetched page, in completion order
    /// * `Err(CrawlerError)` - A worker task failed
    pub async fn run(self) -> crate::Result<Vec<CrawlResult>> {
        tracing::info!(
            "Starting crawl of {} with {} workers (budget {} pages, scope: {})",
            self.start_url,
            self.workers,
            self.frontier.page_budget(),
            if self.base_domain.is_empty() {
                "all hosts"
            } else {
                self.base_domain.as_str()
            }
        );

        let sink = Arc::new(ResultSink::new());
        let start_time = Instant::now();

        let mut workers = JoinSet::new();
        for worker_id in 0..self.workers {
            workers.spawn(worker_loop(
                worker_id,
                Arc::clone(&self.frontier),
                Arc::clone(&self.processor),
                Arc::clone(&sink),
                start_time,
            ));
        }

        let mut failure = None;
        let mut stopped = false;
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(Termination::Stopped) => stopped = true,
                Ok(_) => {}
                Err(e) => {
                    tracing::error!("Worker task failed: {}", e);
                    self.frontier.request_stop();
                    failure.get_or_insert_with(|| e.to_string());
                }
            }
        }

        if let Some(message) = failure {
            return Err(CrawlerError::Worker(message));
        }

        let results = Arc::try_unwrap(sink)
            .map(ResultSink::into_results)
            .unwrap_or_else(|sink| sink.snapshot());

        tracing::info!(
            "Crawl {}: {} pages crawled in {:?}",
            if stopped { "stopped" } else { "completed" },
            results.len(),
            start_time.elapsed()
        );

        Ok(results)
    }
}

/// Worker loop: take an entry, process it, record it, report completion
async fn worker_loop(
    worker_id: usize,
    frontier: Arc<Frontier>,
    processor: Arc<PageProcessor>,
    sink: Arc<ResultSink>,
    start_time: Instant,
) -> Termination {
    let _guard = StopOnPanic(&frontier);

    loop {
        let entry = match frontier.next_entry().await {
            Dequeued::Entry(entry) => entry,
            Dequeued::Terminate(reason) => {
                tracing::debug!("Worker {} exiting: {:?}", worker_id, reason);
                return reason;
            }
        };

        tracing::debug!("Worker {} processing {}", worker_id, entry.url);
        let result = processor.process(&entry).await;

        // Record before completing so the page is in the sink by the time
        // anyone can observe it as crawled.
        sink.record(result);
        let pages_crawled = frontier.complete();

        if pages_crawled % PROGRESS_INTERVAL == 0 {
            let elapsed = start_time.elapsed().as_secs_f64();
            let rate = if elapsed > 0.0 {
                pages_crawled as f64 / elapsed
            } else {
                0.0
            };
            tracing::info!(
                "Progress: {} pages crawled, {} in frontier, {:.2} pages/sec",
                pages_crawled,
                frontier.snapshot().queued,
                rate
            );
        }
    }
}
