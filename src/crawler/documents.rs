//! Document-collecting crawler
//!
//! Fetches the index page, classifies its links and follows each one a
//! single hop to an intermediate page. Every intermediate page that yields a
//! PDF becomes an [`ApaDocument`]. Nothing is re-queued and no page is ever
//! retried.

use crate::config::{validate, Config};
use crate::crawler::links::classify_links;
use crate::crawler::parser::parse_html;
use crate::crawler::resolver::{resolve_pdf_with, ResolvedPdf};
use crate::crawler::title::extract_title;
use crate::crawler::{Fetcher, Throttle};
use crate::output::{
    download_pdfs, save_documents, timestamp_now, ApaDocument, CrawlReporter, DocumentReport,
    DownloadSummary,
};
use crate::state::{KeyMode, PageOutcome, VisitedSet};
use crate::{OutputResult, Result};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;
use url::Url;

/// Crawls the index page and the intermediate pages it links to
pub struct DocumentCrawler {
    base_url: Url,
    fetcher: Fetcher,
    throttle: Throttle,
    reporter: Arc<dyn CrawlReporter>,
    visited: VisitedSet,
    documents: Vec<ApaDocument>,
}

impl DocumentCrawler {
    /// Creates a crawler from the configuration
    ///
    /// # Returns
    ///
    /// * `Ok(DocumentCrawler)` - Ready to crawl
    /// * `Err(ApaError)` - The configuration fails validation or the HTTP
    ///   client could not be built
    pub fn new(config: &Config, reporter: Arc<dyn CrawlReporter>) -> Result<Self> {
        validate(config)?;
        let base_url = Url::parse(&config.crawler.base_url)?;
        let fetcher = Fetcher::new(config)?;
        let throttle = Throttle::new(config.crawler.delay());

        Ok(Self::with_parts(base_url, fetcher, throttle, reporter))
    }

    /// Creates a crawler from already-built parts
    pub fn with_parts(
        base_url: Url,
        fetcher: Fetcher,
        throttle: Throttle,
        reporter: Arc<dyn CrawlReporter>,
    ) -> Self {
        Self {
            base_url,
            fetcher,
            throttle,
            reporter,
            visited: VisitedSet::new(KeyMode::Exact),
            documents: Vec::new(),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Documents recorded so far, in discovery order
    pub fn documents(&self) -> &[ApaDocument] {
        &self.documents
    }

    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    /// Crawls the index page and every ruling link on it
    ///
    /// If the index page cannot be fetched the failure is reported and the
    /// crawl ends with no documents.
    pub async fn crawl_main_page(&mut self) -> &[ApaDocument] {
        self.reporter.crawl_started(self.base_url.as_str());

        let links = match self.fetch_links().await {
            Some(links) => links,
            None => {
                self.reporter.links_found(0);
                self.reporter.crawl_finished(self.documents.len());
                return &self.documents;
            }
        };

        self.reporter.links_found(links.len());

        for link in &links {
            let outcome = self.crawl_page(link).await;
            tracing::debug!("{} -> {}", link, outcome);
        }

        self.reporter.crawl_finished(self.documents.len());
        &self.documents
    }

    async fn fetch_links(&self) -> Option<BTreeSet<String>> {
        self.reporter.fetching(self.base_url.as_str());

        match self.fetcher.fetch_page(self.base_url.as_str()).await {
            Ok(body) => {
                let document = parse_html(&body);
                Some(classify_links(&document, &self.base_url))
            }
            Err(e) => {
                self.reporter.fetch_failed(&e);
                None
            }
        }
    }

    /// Processes one intermediate page
    ///
    /// A URL already seen in this run is skipped without a request. The
    /// courtesy delay runs before every request this method sends.
    pub async fn crawl_page(&mut self, url: &str) -> PageOutcome {
        if !self.visited.insert(url) {
            return PageOutcome::AlreadyVisited;
        }

        self.throttle.wait().await;
        self.reporter.fetching(url);

        let body = match self.fetcher.fetch_page(url).await {
            Ok(body) => body,
            Err(e) => {
                self.reporter.fetch_failed(&e);
                return PageOutcome::FetchFailed;
            }
        };

        let (title, resolved) = match Url::parse(url) {
            Ok(page_url) => inspect_page(&body, &page_url),
            Err(e) => {
                tracing::warn!("Cannot resolve references on {}: {}", url, e);
                (extract_title(&parse_html(&body)), None)
            }
        };

        let Some(resolved) = resolved else {
            self.reporter.pdf_missing(url);
            return PageOutcome::NoPdf;
        };

        tracing::debug!("Resolved {} via {}", resolved.url, resolved.heuristic);

        let document = ApaDocument {
            title,
            intermediate_url: url.to_string(),
            pdf_url: resolved.url,
            date_found: timestamp_now(),
        };

        self.reporter.document_found(&document);
        self.documents.push(document.clone());

        PageOutcome::Recorded(document)
    }

    /// Builds the report for everything recorded so far
    pub fn report(&self) -> DocumentReport {
        DocumentReport::new(self.base_url.as_str(), &self.documents)
    }

    /// Writes the report to `path`
    pub fn save_results(&self, path: &Path) -> OutputResult<()> {
        save_documents(&self.report(), path)?;
        self.reporter.results_saved(path);
        Ok(())
    }

    /// Downloads every recorded PDF into `download_dir`
    pub async fn download_pdfs(&self, download_dir: &Path) -> OutputResult<DownloadSummary> {
        download_pdfs(
            &self.fetcher,
            &self.throttle,
            &self.documents,
            download_dir,
            self.reporter.as_ref(),
        )
        .await
    }
}

/// Title and PDF reference of an intermediate page
fn inspect_page(body: &str, page_url: &Url) -> (String, Option<ResolvedPdf>) {
    let document = parse_html(body);
    (extract_title(&document), resolve_pdf_with(&document, page_url))
}
