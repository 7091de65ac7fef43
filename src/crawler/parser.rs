//! HTML helpers shared by the link classifier, PDF resolver and title
//! extractor
//!
//! Markup on the target site is heterogeneous, so everything here is
//! lenient: unparsable selectors yield nothing instead of an error.

use scraper::{ElementRef, Html, Selector};

/// Parses an HTML document
///
/// # Example
///
/// ```
/// use apa_crawler::crawler::{anchors, parse_html};
///
/// let html = r#"<html><body><a href="/apa-1">APA 1</a></body></html>"#;
/// let document = parse_html(html);
/// assert_eq!(anchors(&document).len(), 1);
/// ```
pub fn parse_html(html: &str) -> Html {
    Html::parse_document(html)
}

/// An `<a href>` element together with its raw href and visible text
#[derive(Debug, Clone)]
pub struct Anchor<'a> {
    /// The href exactly as written in the markup
    pub href: &'a str,

    /// Visible text, trimmed
    pub text: String,
}

/// Returns every anchor carrying an href, in document order
pub fn anchors(document: &Html) -> Vec<Anchor<'_>> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| {
            element.value().attr("href").map(|href| Anchor {
                href,
                text: element_text(&element),
            })
        })
        .collect()
}

/// Returns the `content` attribute of every `<meta>` tag, in document order
pub fn meta_contents(document: &Html) -> Vec<&str> {
    let Ok(selector) = Selector::parse("meta[content]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("content"))
        .collect()
}

/// Collects an element's text
///
/// Each text node is trimmed and the pieces are concatenated without a
/// separator, so `APA<br>12` reads `APA12`.
pub fn element_text(element: &ElementRef<'_>) -> String {
    element.text().map(str::trim).collect::<String>()
}

/// Returns every non-empty text node of the document, trimmed
pub fn text_nodes(document: &Html) -> Vec<&str> {
    document
        .root_element()
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
