//! Shared helpers for the integration tests

#![allow(dead_code)]

use apa_crawler::crawler::{build_http_client, Fetcher};
use apa_crawler::output::{ApaDocument, CrawlReporter};
use apa_crawler::{FetchError, OutputError};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use wiremock::ResponseTemplate;

/// Fetcher with short timeouts for tests
pub fn test_fetcher() -> Fetcher {
    let client = build_http_client("TestBot/1.0", Duration::from_secs(5))
        .expect("Failed to build HTTP client");
    Fetcher::with_client(client, Duration::from_secs(5), Duration::from_secs(5))
}

/// A 200 response carrying `body` as HTML
pub fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", body))
        .insert_header("content-type", "text/html")
}

/// Crawl events as seen by [`RecordingReporter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Fetching(String),
    FetchFailed(String),
    LinksFound(usize),
    DocumentFound(String),
    PdfMissing(String),
    TitleFound(String),
    LimitReached,
    Finished(usize),
    Saved(PathBuf),
    DownloadCompleted(PathBuf),
    DownloadFailed(String),
}

/// Reporter that remembers every event it receives
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<Event>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().expect("reporter lock").clone()
    }

    /// URLs requested, in order
    pub fn fetched(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Fetching(url) => Some(url),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, predicate: impl Fn(&Event) -> bool) -> usize {
        self.events().iter().filter(|event| predicate(event)).count()
    }

    fn push(&self, event: Event) {
        self.events.lock().expect("reporter lock").push(event);
    }
}

impl CrawlReporter for RecordingReporter {
    fn fetching(&self, url: &str) {
        self.push(Event::Fetching(url.to_string()));
    }

    fn fetch_failed(&self, error: &FetchError) {
        self.push(Event::FetchFailed(error.url().to_string()));
    }

    fn links_found(&self, count: usize) {
        self.push(Event::LinksFound(count));
    }

    fn document_found(&self, document: &ApaDocument) {
        self.push(Event::DocumentFound(document.pdf_url.clone()));
    }

    fn pdf_missing(&self, url: &str) {
        self.push(Event::PdfMissing(url.to_string()));
    }

    fn title_found(&self, title: &str, _url: &str) {
        self.push(Event::TitleFound(title.to_string()));
    }

    fn limit_reached(&self, _reason: &str) {
        self.push(Event::LimitReached);
    }

    fn crawl_finished(&self, count: usize) {
        self.push(Event::Finished(count));
    }

    fn results_saved(&self, path: &Path) {
        self.push(Event::Saved(path.to_path_buf()));
    }

    fn download_completed(&self, path: &Path) {
        self.push(Event::DownloadCompleted(path.to_path_buf()));
    }

    fn download_failed(&self, url: &str, _error: &OutputError) {
        self.push(Event::DownloadFailed(url.to_string()));
    }
}
