//! Title extraction
//!
//! [`extract_title`] names an intermediate page for the document report.
//! [`scan_apa_titles`] finds ruling identifiers such as
//! `20230115 APA 000123` anywhere in a page's text.

use crate::crawler::parser::{element_text, text_nodes};
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::OnceLock;

/// Returned when no selector yields a usable title
pub const UNKNOWN_TITLE: &str = "Unknown Document";

/// Selectors tried in order; only the first match of each is considered
pub const TITLE_SELECTORS: &[&str] = &[
    "h1",
    "title",
    ".page-title",
    ".document-title",
    "[class*=\"title\"]",
];

/// Titles must be longer than this many characters
const MIN_TITLE_CHARS: usize = 5;

static APA_TITLE_RE: OnceLock<Regex> = OnceLock::new();

fn apa_title_re() -> &'static Regex {
    APA_TITLE_RE.get_or_init(|| Regex::new(r"\b\d{8}\s+APA\s+\d{6}\b").expect("apa title regex"))
}

/// Extracts a page title
///
/// # Example
///
/// ```
/// use apa_crawler::crawler::{extract_title, parse_html};
///
/// let html = "<html><head><title>Home</title></head><body><h1>APA 2023-017</h1></body></html>";
/// assert_eq!(extract_title(&parse_html(html)), "APA 2023-017");
/// ```
pub fn extract_title(document: &Html) -> String {
    TITLE_SELECTORS
        .iter()
        .find_map(|selector| first_match_text(document, selector))
        .unwrap_or_else(|| UNKNOWN_TITLE.to_string())
}

/// Text of the first element matching `selector`, if long enough
fn first_match_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    let element = document.select(&selector).next()?;
    let text = element_text(&element);

    (text.chars().count() > MIN_TITLE_CHARS).then_some(text)
}

/// Returns every APA title in the document's text, in document order
///
/// The pattern is eight digits, `APA`, six digits, separated by whitespace
/// and bounded by word boundaries. Duplicates are kept.
pub fn scan_apa_titles(document: &Html) -> Vec<String> {
    let re = apa_title_re();

    text_nodes(document)
        .into_iter()
        .flat_map(|text| re.find_iter(text).map(|m| m.as_str().to_string()))
        .collect()
}
