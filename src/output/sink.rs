use crate::crawler::CrawlResult;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Thread-safe, append-only collection of crawl results
///
/// The sink has its own lock, independent of the frontier's: appends commute
/// and nothing about the frontier depends on them.
#[derive(Debug, Default)]
pub struct ResultSink {
    results: Mutex<Vec<CrawlResult>>,
}

impl ResultSink {
    /// Creates an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<CrawlResult>> {
        self.results.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends one result
    pub fn record(&self, result: CrawlResult) {
        self.lock().push(result);
    }

    /// Number of results recorded so far
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copies the results recorded so far, in append order
    pub fn snapshot(&self) -> Vec<CrawlResult> {
        self.lock().clone()
    }

    /// Consumes the sink, returning its results in append order
    pub fn into_results(self) -> Vec<CrawlResult> {
        self.results
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
