//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `Fetcher` seam
//! - HTML parsing and link extraction behind the `Extractor` seam
//! - The shared frontier with its visited set and termination detection
//! - Per-page processing and the worker pool that drives it

mod coordinator;
mod fetcher;
mod frontier;
mod parser;
mod processor;

pub use coordinator::{Crawler, StopHandle};
pub use fetcher::{build_http_client, FetchError, FetchResponse, Fetcher, HttpFetcher};
pub use frontier::{Dequeued, Frontier, FrontierEntry, FrontierSnapshot, Termination};
pub use parser::{parse_html, Extractor, HtmlExtractor, ParsedPage};
pub use processor::{admissible_links, CrawlResult, PageProcessor};

