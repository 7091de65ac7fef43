//! Crawler module for fetching pages and locating rulings
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with fixed timeouts
//! - HTML helpers, link classification, PDF resolution and title extraction
//! - Request pacing
//! - The two crawl controllers: [`DocumentCrawler`] and [`TitleWalker`]

mod documents;
mod fetcher;
mod links;
mod parser;
mod resolver;
mod scheduler;
mod title;
mod walker;

pub use documents::DocumentCrawler;
pub use fetcher::{build_http_client, Fetcher};
pub use links::{classify_links, same_site_links, RULING_TEXT_KEYWORDS, RULING_URL_PATTERNS};
pub use parser::{anchors, element_text, meta_contents, parse_html, text_nodes, Anchor};
pub use resolver::{
    extract_pdf_url, is_pdf_url, resolve_pdf, resolve_pdf_with, HeuristicKind, PdfHeuristic,
    ResolvedPdf, DOWNLOAD_CUES, DOWNLOAD_HOST, PDF_HEURISTICS,
};
pub use scheduler::Throttle;
pub use title::{extract_title, scan_apa_titles, TITLE_SELECTORS, UNKNOWN_TITLE};
pub use walker::TitleWalker;

use crate::config::Config;
use crate::output::{ApaDocument, CrawlReporter};
use crate::Result;
use std::sync::Arc;

/// Runs the document-collecting crawl and returns the crawler
///
/// The crawler is returned rather than just its documents so the caller can
/// save the report and decide about downloads afterwards.
///
/// # Example
///
/// ```no_run
/// use apa_crawler::config::Config;
/// use apa_crawler::crawler::crawl_documents;
/// use apa_crawler::output::TracingReporter;
/// use std::sync::Arc;
///
/// # async fn run() -> Result<(), apa_crawler::ApaError> {
/// let crawler = crawl_documents(&Config::default(), Arc::new(TracingReporter)).await?;
/// println!("{} documents", crawler.documents().len());
/// # Ok(())
/// # }
/// ```
pub async fn crawl_documents(
    config: &Config,
    reporter: Arc<dyn CrawlReporter>,
) -> Result<DocumentCrawler> {
    let mut crawler = DocumentCrawler::new(config, reporter)?;
    crawler.crawl_main_page().await;
    Ok(crawler)
}

/// Runs the title walk and returns the walker
pub async fn walk_titles(
    config: &Config,
    reporter: Arc<dyn CrawlReporter>,
) -> Result<TitleWalker> {
    let mut walker = TitleWalker::new(config, reporter)?;
    walker.crawl().await;
    Ok(walker)
}

/// Numbered console listing of resolved documents
pub fn format_document_list(documents: &[ApaDocument]) -> String {
    let mut out = String::new();
    for (i, doc) in documents.iter().enumerate() {
        out.push_str(&format!("{}. {}\n   PDF: {}\n\n", i + 1, doc.title, doc.pdf_url));
    }
    out
}
