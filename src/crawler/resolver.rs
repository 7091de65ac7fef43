//! PDF resolution for intermediate pages
//!
//! An intermediate page is expected to link to exactly one ruling PDF, but
//! the markup varies from page to page. Resolution walks
//! [`PDF_HEURISTICS`] in priority order and stops at the first hit; there
//! is no scoring.
//!
//! | Priority | Heuristic | Result |
//! |----------|-----------|--------|
//! | 1 | href ends with `.pdf` (any case) | href resolved against the page |
//! | 2 | href contains the download host | href verbatim |
//! | 3 | text contains a download cue and the resolved URL looks like a PDF | resolved URL |
//! | 4 | `<meta content>` mentions `.pdf` and holds an absolute PDF URL | extracted URL resolved against the page |

use crate::crawler::parser::{anchors, meta_contents};
use crate::url::join_url;
use regex::Regex;
use scraper::Html;
use std::fmt;
use std::sync::OnceLock;
use url::Url;

/// Host that serves ruling PDFs directly
pub const DOWNLOAD_HOST: &str = "download.belastingdienst.nl";

/// Visible-text words that mark a download link
pub const DOWNLOAD_CUES: &[&str] = &["download", "pdf", "document"];

static PDF_URL_RE: OnceLock<Regex> = OnceLock::new();

fn pdf_url_re() -> &'static Regex {
    PDF_URL_RE.get_or_init(|| Regex::new(r#"https?://[^\s<>"]+\.pdf"#).expect("pdf url regex"))
}

/// Which heuristic produced a PDF URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeuristicKind {
    PdfSuffix,
    DownloadHost,
    DownloadCue,
    MetaContent,
}

impl HeuristicKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::PdfSuffix => "pdf-suffix",
            Self::DownloadHost => "download-host",
            Self::DownloadCue => "download-cue",
            Self::MetaContent => "meta-content",
        }
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One entry of the priority table
#[derive(Clone, Copy)]
pub struct PdfHeuristic {
    pub kind: HeuristicKind,
    pub find: fn(&Html, &Url) -> Option<String>,
}

impl fmt::Debug for PdfHeuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PdfHeuristic").field("kind", &self.kind).finish()
    }
}

/// Heuristics in priority order
pub const PDF_HEURISTICS: &[PdfHeuristic] = &[
    PdfHeuristic {
        kind: HeuristicKind::PdfSuffix,
        find: find_pdf_suffix,
    },
    PdfHeuristic {
        kind: HeuristicKind::DownloadHost,
        find: find_download_host,
    },
    PdfHeuristic {
        kind: HeuristicKind::DownloadCue,
        find: find_download_cue,
    },
    PdfHeuristic {
        kind: HeuristicKind::MetaContent,
        find: find_meta_content,
    },
];

/// A PDF reference and the heuristic that found it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPdf {
    pub url: String,
    pub heuristic: HeuristicKind,
}

/// Locates the PDF an intermediate page points at
///
/// # Example
///
/// ```
/// use apa_crawler::crawler::{parse_html, resolve_pdf};
/// use url::Url;
///
/// let html = r#"<a href="files/apa-2023.PDF">Beschikking</a>"#;
/// let page = Url::parse("https://example.com/ruling/apa-2023").unwrap();
/// assert_eq!(
///     resolve_pdf(&parse_html(html), &page).as_deref(),
///     Some("https://example.com/ruling/files/apa-2023.PDF")
/// );
/// ```
pub fn resolve_pdf(document: &Html, page_url: &Url) -> Option<String> {
    resolve_pdf_with(document, page_url).map(|resolved| resolved.url)
}

/// Like [`resolve_pdf`], but also reports which heuristic fired
pub fn resolve_pdf_with(document: &Html, page_url: &Url) -> Option<ResolvedPdf> {
    PDF_HEURISTICS.iter().find_map(|heuristic| {
        (heuristic.find)(document, page_url).map(|url| ResolvedPdf {
            url,
            heuristic: heuristic.kind,
        })
    })
}

/// Returns true if `url` ends in `.pdf` (any case) or points at the
/// download host
pub fn is_pdf_url(url: &str) -> bool {
    url.to_lowercase().ends_with(".pdf") || url.contains(DOWNLOAD_HOST)
}

/// Extracts the first absolute `http(s)://...pdf` URL from free text
pub fn extract_pdf_url(text: &str) -> Option<&str> {
    pdf_url_re().find(text).map(|m| m.as_str())
}

fn find_pdf_suffix(document: &Html, page_url: &Url) -> Option<String> {
    anchors(document)
        .into_iter()
        .filter(|anchor| anchor.href.to_lowercase().ends_with(".pdf"))
        .find_map(|anchor| join_url(page_url, anchor.href))
}

// The href is returned unresolved, so a relative download-host href stays
// relative. See DESIGN.md before changing this.
fn find_download_host(document: &Html, _page_url: &Url) -> Option<String> {
    anchors(document)
        .into_iter()
        .find(|anchor| anchor.href.contains(DOWNLOAD_HOST))
        .map(|anchor| anchor.href.to_string())
}

fn find_download_cue(document: &Html, page_url: &Url) -> Option<String> {
    anchors(document)
        .into_iter()
        .filter(|anchor| !anchor.href.is_empty())
        .filter(|anchor| {
            let text = anchor.text.to_lowercase();
            DOWNLOAD_CUES.iter().any(|cue| text.contains(cue))
        })
        .filter_map(|anchor| join_url(page_url, anchor.href))
        .find(|url| is_pdf_url(url))
}

fn find_meta_content(document: &Html, page_url: &Url) -> Option<String> {
    meta_contents(document)
        .into_iter()
        .filter(|content| content.contains(".pdf"))
        .filter_map(extract_pdf_url)
        .find_map(|url| join_url(page_url, url))
}
