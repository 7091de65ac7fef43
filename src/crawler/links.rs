//! Link classification
//!
//! Two filters over the anchors of a page:
//! - [`classify_links`] picks anchors that plausibly lead to an APA ruling.
//!   It is deliberately loose; the PDF resolver is the real filter.
//! - [`same_site_links`] picks every anchor that stays under the site root,
//!   for the recursive title walker.

use crate::crawler::parser::anchors;
use crate::url::resolve_link;
use scraper::Html;
use std::collections::{BTreeSet, HashSet};
use url::Url;

/// Resolved-URL fragments that mark a ruling page
pub const RULING_URL_PATTERNS: &[&str] = &["advance-pricing-agreement", "apa-", "/rul-", "ruling"];

/// Visible-text keywords that mark a ruling link
pub const RULING_TEXT_KEYWORDS: &[&str] = &["apa", "advance pricing agreement", "ruling"];

/// Returns the absolute URLs of anchors that look like APA rulings
///
/// An anchor qualifies when its lowercased resolved URL contains one of
/// [`RULING_URL_PATTERNS`] or its lowercased visible text contains one of
/// [`RULING_TEXT_KEYWORDS`]. Anchors that do not resolve to HTTP(S) are
/// ignored.
///
/// # Example
///
/// ```
/// use apa_crawler::crawler::{classify_links, parse_html};
/// use url::Url;
///
/// let html = r#"<a href="/nl/apa-2023-001">Ruling 1</a><a href="/contact">Contact</a>"#;
/// let base = Url::parse("https://example.com/index").unwrap();
/// let links = classify_links(&parse_html(html), &base);
/// assert_eq!(links.len(), 1);
/// assert!(links.contains("https://example.com/nl/apa-2023-001"));
/// ```
pub fn classify_links(document: &Html, base_url: &Url) -> BTreeSet<String> {
    let mut links = BTreeSet::new();

    for anchor in anchors(document) {
        let Some(full_url) = resolve_link(anchor.href, base_url) else {
            continue;
        };

        if is_ruling_url(&full_url) || is_ruling_text(&anchor.text) {
            links.insert(full_url);
        }
    }

    links
}

fn is_ruling_url(url: &str) -> bool {
    let lowered = url.to_lowercase();
    RULING_URL_PATTERNS
        .iter()
        .any(|pattern| lowered.contains(pattern))
}

fn is_ruling_text(text: &str) -> bool {
    let lowered = text.to_lowercase();
    RULING_TEXT_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}

/// Returns links that stay on the site, in document order
///
/// Fragment-only hrefs are skipped. A resolved URL is kept when it contains
/// `site_root` as a substring; this is containment, not domain equality, so
/// only pages below the root are followed. Duplicates keep their first
/// position.
pub fn same_site_links(document: &Html, page_url: &Url, site_root: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for anchor in anchors(document) {
        let Some(full_url) = resolve_link(anchor.href, page_url) else {
            continue;
        };

        if full_url.contains(site_root) && seen.insert(full_url.clone()) {
            links.push(full_url);
        }
    }

    links
}
