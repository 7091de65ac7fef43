/// Outcome definitions for intermediate pages
///
/// Every candidate link the document crawler attempts ends in exactly one
/// of these outcomes. Only `Recorded` contributes to the report.
use crate::output::ApaDocument;
use std::fmt;

/// Result of processing one intermediate page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// A PDF was resolved and a document record created
    Recorded(ApaDocument),

    /// The URL was fetched earlier in this run; nothing was requested
    AlreadyVisited,

    /// The page could not be fetched (transport error or non-2xx status)
    FetchFailed,

    /// The page was fetched but no PDF reference could be resolved
    NoPdf,
}

impl PageOutcome {
    /// Returns a short label for logs and summaries
    pub fn label(&self) -> &'static str {
        match self {
            Self::Recorded(_) => "recorded",
            Self::AlreadyVisited => "already_visited",
            Self::FetchFailed => "fetch_failed",
            Self::NoPdf => "no_pdf",
        }
    }
}

impl fmt::Display for PageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let recorded = PageOutcome::Recorded(ApaDocument {
            title: "APA 2023".to_string(),
            intermediate_url: "https://example.com/apa-1".to_string(),
            pdf_url: "https://example.com/apa-1.pdf".to_string(),
            date_found: "2024-01-01T00:00:00.000000".to_string(),
        });

        assert_eq!(format!("{}", recorded), "recorded");
        assert_eq!(format!("{}", PageOutcome::AlreadyVisited), "already_visited");
        assert_eq!(format!("{}", PageOutcome::NoPdf), "no_pdf");
        assert_eq!(format!("{}", PageOutcome::FetchFailed), "fetch_failed");
    }
}
