//! URL handling for the APA crawler
//!
//! This module resolves hrefs found in markup against the page they appear
//! on, and normalizes URLs into the keys the title walker tracks.

mod normalize;

pub use normalize::normalize_url;

use url::Url;

/// Resolves a possibly relative reference against `base`
///
/// This is plain RFC 3986 resolution with no filtering: whatever the href
/// points at, the absolute form is returned. `None` only when the
/// combination cannot be parsed at all.
///
/// # Examples
///
/// ```
/// use apa_crawler::url::join_url;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/ruling/apa").unwrap();
/// assert_eq!(
///     join_url(&base, "docs/a.pdf").as_deref(),
///     Some("https://example.com/ruling/docs/a.pdf")
/// );
/// ```
pub fn join_url(base: &Url, href: &str) -> Option<String> {
    base.join(href.trim()).ok().map(|url| url.to_string())
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should not be followed:
/// - empty or fragment-only hrefs (same page anchors)
/// - javascript:, mailto:, tel: and data: schemes
/// - hrefs that do not resolve to HTTP(S)
pub fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/ruling/apa").unwrap()
    }

    #[test]
    fn test_join_relative_path() {
        assert_eq!(
            join_url(&base_url(), "other").as_deref(),
            Some("https://example.com/ruling/other")
        );
    }

    #[test]
    fn test_join_root_relative() {
        assert_eq!(
            join_url(&base_url(), "/files/x.pdf").as_deref(),
            Some("https://example.com/files/x.pdf")
        );
    }

    #[test]
    fn test_join_keeps_absolute() {
        assert_eq!(
            join_url(&base_url(), "https://other.org/a").as_deref(),
            Some("https://other.org/a")
        );
    }

    #[test]
    fn test_resolve_absolute_link() {
        assert_eq!(
            resolve_link("https://other.com/page", &base_url()).as_deref(),
            Some("https://other.com/page")
        );
    }

    #[test]
    fn test_resolve_relative_link() {
        assert_eq!(
            resolve_link("/other", &base_url()).as_deref(),
            Some("https://example.com/other")
        );
    }

    #[test]
    fn test_skip_special_schemes() {
        assert!(resolve_link("javascript:void(0)", &base_url()).is_none());
        assert!(resolve_link("mailto:test@example.com", &base_url()).is_none());
        assert!(resolve_link("tel:+31201234567", &base_url()).is_none());
        assert!(resolve_link("data:text/html,<h1>x</h1>", &base_url()).is_none());
        assert!(resolve_link("ftp://example.com/file", &base_url()).is_none());
    }

    #[test]
    fn test_skip_fragment_and_empty() {
        assert!(resolve_link("#section", &base_url()).is_none());
        assert!(resolve_link("   ", &base_url()).is_none());
    }
}
