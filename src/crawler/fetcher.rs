//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with the configured user agent
//! - GET requests for HTML pages (30 s timeout by default)
//! - GET requests for binary PDF downloads (60 s timeout by default)
//! - Error classification
//!
//! Every call is a single attempt. There is no retry and no caching; the
//! caller decides what a failure means for the crawl.

use crate::config::Config;
use crate::{FetchError, FetchResult};
use reqwest::{Client, Response};
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - Value for the `User-Agent` header
/// * `connect_timeout` - TCP connect timeout
///
/// # Example
///
/// ```no_run
/// use apa_crawler::config::DEFAULT_USER_AGENT;
/// use apa_crawler::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(DEFAULT_USER_AGENT, Duration::from_secs(10)).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &str,
    connect_timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .connect_timeout(connect_timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Issues page and download requests over one shared client
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    page_timeout: Duration,
    download_timeout: Duration,
}

impl Fetcher {
    /// Creates a fetcher from the crawler configuration
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = build_http_client(
            &config.crawler.user_agent,
            Duration::from_secs(config.fetch.connect_timeout_secs),
        )?;

        Ok(Self::with_client(
            client,
            Duration::from_secs(config.fetch.page_timeout_secs),
            Duration::from_secs(config.fetch.download_timeout_secs),
        ))
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client, page_timeout: Duration, download_timeout: Duration) -> Self {
        Self {
            client,
            page_timeout,
            download_timeout,
        }
    }

    /// Fetches an HTML page and returns its body
    ///
    /// Fails on any transport error or non-2xx status.
    pub async fn fetch_page(&self, url: &str) -> FetchResult<String> {
        let response = self.send(url, self.page_timeout).await?;

        response.text().await.map_err(|e| classify_error(url, e))
    }

    /// Fetches a binary resource (a PDF) and returns its bytes
    pub async fn fetch_bytes(&self, url: &str) -> FetchResult<Vec<u8>> {
        let response = self.send(url, self.download_timeout).await?;

        response
            .bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|e| classify_error(url, e))
    }

    async fn send(&self, url: &str, timeout: Duration) -> FetchResult<Response> {
        tracing::debug!("GET {} (timeout {:?})", url, timeout);

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}

/// Maps a reqwest error onto the fetch error taxonomy
fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        FetchError::Connect {
            url: url.to_string(),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            source: error,
        }
    }
}
