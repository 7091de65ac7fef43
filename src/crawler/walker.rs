//! Recursive title walker
//!
//! Walks every page below the base URL depth-first and collects APA titles
//! from their text. The walk uses an explicit stack, so it visits pages in
//! the same pre-order a recursive descent would, without growing the call
//! stack. Visited pages are keyed on normalized URLs and the walk can be
//! capped by page count and link depth.

use crate::config::{validate, Config};
use crate::crawler::links::same_site_links;
use crate::crawler::parser::parse_html;
use crate::crawler::title::scan_apa_titles;
use crate::crawler::{Fetcher, Throttle};
use crate::output::{save_titles, CrawlReporter, TitleReport};
use crate::state::{KeyMode, VisitedSet};
use crate::{OutputResult, Result};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;
use url::Url;

/// A page waiting on the walker's stack
#[derive(Debug, Clone)]
struct PendingPage {
    url: String,
    depth: u32,
}

/// Collects APA titles from every same-site page reachable from the base URL
pub struct TitleWalker {
    base_url: Url,
    site_root: String,
    fetcher: Fetcher,
    throttle: Throttle,
    reporter: Arc<dyn CrawlReporter>,
    max_pages: Option<usize>,
    max_depth: Option<u32>,
    visited: VisitedSet,
    titles: BTreeSet<String>,
    pages_fetched: usize,
}

impl TitleWalker {
    /// Creates a walker from the configuration
    ///
    /// The configuration is validated first, so caps set after loading
    /// (for example from the command line) are checked too.
    pub fn new(config: &Config, reporter: Arc<dyn CrawlReporter>) -> Result<Self> {
        validate(config)?;
        let base_url = Url::parse(&config.crawler.base_url)?;
        let fetcher = Fetcher::new(config)?;
        let throttle = Throttle::new(config.crawler.delay());

        Ok(Self::with_parts(base_url, fetcher, throttle, reporter)
            .with_max_pages(config.walker.max_pages)
            .with_max_depth(config.walker.max_depth))
    }

    /// Creates an uncapped walker from already-built parts
    ///
    /// The site root used for the same-site filter is `base_url` exactly as
    /// serialized.
    pub fn with_parts(
        base_url: Url,
        fetcher: Fetcher,
        throttle: Throttle,
        reporter: Arc<dyn CrawlReporter>,
    ) -> Self {
        Self {
            site_root: base_url.to_string(),
            base_url,
            fetcher,
            throttle,
            reporter,
            max_pages: None,
            max_depth: None,
            visited: VisitedSet::new(KeyMode::Normalized),
            titles: BTreeSet::new(),
            pages_fetched: 0,
        }
    }

    /// Stops the walk after this many fetches
    pub fn with_max_pages(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Does not follow links found on pages at this depth (base URL is 0)
    pub fn with_max_depth(mut self, max_depth: Option<u32>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Titles collected so far, sorted
    pub fn titles(&self) -> Vec<String> {
        self.titles.iter().cloned().collect()
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    /// Walks the site and returns the sorted titles
    ///
    /// A failed fetch skips that page and its subtree; if the base URL
    /// itself fails the result is empty.
    pub async fn crawl(&mut self) -> Vec<String> {
        self.reporter.crawl_started(self.base_url.as_str());

        let mut stack = vec![PendingPage {
            url: self.base_url.to_string(),
            depth: 0,
        }];

        while let Some(page) = stack.pop() {
            if self.visited.contains(&page.url) {
                continue;
            }

            if let Some(max_pages) = self.max_pages {
                if self.pages_fetched >= max_pages {
                    self.reporter.limit_reached(&format!("fetched {} pages", max_pages));
                    break;
                }
            }

            self.visited.insert(&page.url);

            if self.pages_fetched > 0 {
                self.throttle.wait().await;
            }

            let links = self.visit(&page).await;

            for link in links.into_iter().rev() {
                if !self.visited.contains(&link) {
                    stack.push(PendingPage {
                        url: link,
                        depth: page.depth + 1,
                    });
                }
            }
        }

        self.reporter.crawl_finished(self.titles.len());
        self.titles()
    }

    /// Fetches one page, records its titles and returns the links to follow
    async fn visit(&mut self, page: &PendingPage) -> Vec<String> {
        self.pages_fetched += 1;
        self.reporter.fetching(&page.url);

        let body = match self.fetcher.fetch_page(&page.url).await {
            Ok(body) => body,
            Err(e) => {
                self.reporter.fetch_failed(&e);
                return Vec::new();
            }
        };

        let page_url = match Url::parse(&page.url) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Cannot resolve links on {}: {}", page.url, e);
                return Vec::new();
            }
        };

        let follow = self.max_depth.map_or(true, |max| page.depth < max);

        let (titles, links) = {
            let document = parse_html(&body);
            let links = if follow {
                same_site_links(&document, &page_url, &self.site_root)
            } else {
                Vec::new()
            };
            (scan_apa_titles(&document), links)
        };

        for title in titles {
            if self.titles.insert(title.clone()) {
                self.reporter.title_found(&title, &page.url);
            }
        }

        links
    }

    /// Builds the report for everything collected so far
    pub fn report(&self) -> TitleReport {
        TitleReport::new(self.titles.iter().cloned())
    }

    /// Writes the report to `path`
    pub fn save_results(&self, path: &Path) -> OutputResult<()> {
        save_titles(&self.report(), path)?;
        self.reporter.results_saved(path);
        Ok(())
    }
}
