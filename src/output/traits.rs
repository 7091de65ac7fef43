//! Crawl reporting interface
//!
//! Crawlers never talk to a global logger directly. Each one receives a
//! [`CrawlReporter`] and announces what happens through it, which lets
//! several crawlers run side by side and lets tests observe events.

use crate::output::ApaDocument;
use crate::{FetchError, OutputError};
use std::path::Path;

/// Receives crawl events
///
/// Every method has an empty default so implementations only override the
/// events they care about. Implementations must be thread-safe.
pub trait CrawlReporter: Send + Sync {
    /// A crawl is starting from `base_url`
    fn crawl_started(&self, _base_url: &str) {}

    /// A request for `url` is about to be sent
    fn fetching(&self, _url: &str) {}

    /// A request failed; the crawl continues without this page
    fn fetch_failed(&self, _error: &FetchError) {}

    /// The index page yielded `count` candidate links
    fn links_found(&self, _count: usize) {}

    /// A PDF was resolved on an intermediate page
    fn document_found(&self, _document: &ApaDocument) {}

    /// An intermediate page carried no recognisable PDF reference
    fn pdf_missing(&self, _url: &str) {}

    /// A title not seen before in this walk was collected from `url`
    fn title_found(&self, _title: &str, _url: &str) {}

    /// The walker stopped early because a configured cap was reached
    fn limit_reached(&self, _reason: &str) {}

    /// A crawl ended with `count` results
    fn crawl_finished(&self, _count: usize) {}

    /// A report was written to `path`
    fn results_saved(&self, _path: &Path) {}

    /// A PDF download is about to start
    fn downloading(&self, _url: &str) {}

    /// A PDF was written to `path`
    fn download_completed(&self, _path: &Path) {}

    /// A PDF download failed; remaining downloads proceed
    fn download_failed(&self, _url: &str, _error: &OutputError) {}
}

/// Forwards crawl events to `tracing`
///
/// This is the reporter the binary installs; the subscriber decides where
/// the lines end up (console, `apa_crawler.log`).
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl CrawlReporter for TracingReporter {
    fn crawl_started(&self, base_url: &str) {
        tracing::info!("Starting APA crawl at {}", base_url);
    }

    fn fetching(&self, url: &str) {
        tracing::info!("Fetching: {}", url);
    }

    fn fetch_failed(&self, error: &FetchError) {
        tracing::error!("Error fetching {}: {}", error.url(), error);
    }

    fn links_found(&self, count: usize) {
        tracing::info!("Found {} potential APA links", count);
    }

    fn document_found(&self, document: &ApaDocument) {
        tracing::info!("Found PDF: {} -> {}", document.title, document.pdf_url);
    }

    fn pdf_missing(&self, url: &str) {
        tracing::warn!("No PDF found on {}", url);
    }

    fn title_found(&self, title: &str, url: &str) {
        tracing::debug!("Found title {} on {}", title, url);
    }

    fn limit_reached(&self, reason: &str) {
        tracing::warn!("Stopping walk early: {}", reason);
    }

    fn crawl_finished(&self, count: usize) {
        tracing::info!("Crawl complete. Found {} results", count);
    }

    fn results_saved(&self, path: &Path) {
        tracing::info!("Results saved to {}", path.display());
    }

    fn downloading(&self, url: &str) {
        tracing::info!("Downloading: {}", url);
    }

    fn download_completed(&self, path: &Path) {
        tracing::info!("Downloaded: {}", path.display());
    }

    fn download_failed(&self, url: &str, error: &OutputError) {
        tracing::error!("Error downloading {}: {}", url, error);
    }
}
