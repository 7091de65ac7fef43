use crate::UrlError;
use url::Url;

/// Normalizes a URL into a visited-set key
///
/// The key is scheme, host, port, path and the sorted query. Parsing
/// already lowercases the scheme and host, drops a default port and
/// collapses `.` and `..` path segments. Anything else in the path (case,
/// trailing slash, repeated slashes) and every query parameter is
/// significant.
///
/// # Examples
///
/// ```
/// use apa_crawler::url::normalize_url;
///
/// let url = normalize_url("HTTPS://EXAMPLE.COM:443/apa/../apa?b=2&a=1#top").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/apa?a=1&b=2");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingDomain);
    }

    url.set_fragment(None);

    if url.query().is_some() {
        let mut params: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        params.sort();

        if params.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut()
                .clear()
                .extend_pairs(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
    }

    Ok(url)
}
