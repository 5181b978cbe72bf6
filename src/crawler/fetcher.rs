//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - The `Fetcher` seam the page processor calls through
//! - Building HTTP clients with the configured user agent and timeouts
//! - GET requests that follow a bounded number of redirects
//! - Error classification for transport failures

use crate::config::HttpConfig;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use thiserror::Error;

/// A completed HTTP exchange
///
/// Any status code counts as completed, 4xx and 5xx included.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// HTTP status code
    pub status: u16,

    /// Final URL after redirects
    pub effective_url: String,

    /// Page body content
    pub body: String,

    /// Response headers as `name: value` lines
    pub headers: Vec<String>,
}

/// A transport failure: no HTTP exchange completed
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct FetchError {
    pub message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Fetches a URL on behalf of a worker
///
/// Implementations are shared by every worker of a crawl and must tolerate
/// concurrent calls. Timeouts are the implementation's responsibility.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Performs a GET for `url`
    async fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// Certificate and host name verification stay enabled; there is no switch
/// to turn them off.
///
/// # Arguments
///
/// * `config` - The HTTP configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use site_crawler::config::HttpConfig;
/// use site_crawler::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .redirect(Policy::limited(config.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// The production fetcher, backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a client built from `config`
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    /// Fetches a URL and classifies any failure
    ///
    /// # Error Classification
    ///
    /// | Condition | Message |
    /// |-----------|---------|
    /// | Timeout | `Request timeout` |
    /// | Connection refused / DNS / TLS | `Connection failed: ...` |
    /// | Redirect chain too long | `Too many redirects` |
    /// | Body could not be read | `Failed to read body: ...` |
    /// | Anything else | reqwest's own message |
    async fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(classify_error)?;

        let status = response.status().as_u16();
        let effective_url = response.url().to_string();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| format!("{}: {}", name, String::from_utf8_lossy(value.as_bytes())))
            .collect();

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::new(format!("Failed to read body: {}", e)))?;

        Ok(FetchResponse {
            status,
            effective_url,
            body,
            headers,
        })
    }
}

/// Maps a reqwest error onto a human-readable transport failure
fn classify_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::new("Request timeout")
    } else if e.is_redirect() {
        FetchError::new("Too many redirects")
    } else if e.is_connect() {
        FetchError::new(format!("Connection failed: {}", e))
    } else {
        FetchError::new(e.to_string())
    }
}
