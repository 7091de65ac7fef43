//! PDF downloads
//!
//! Downloads run one at a time with the crawler's courtesy delay between
//! files. A failed download is reported and skipped.

use crate::crawler::{Fetcher, Throttle};
use crate::output::{ApaDocument, CrawlReporter};
use crate::OutputResult;
use std::path::{Path, PathBuf};
use url::Url;

/// What a download pass produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadSummary {
    /// Files written, in download order
    pub downloaded: Vec<PathBuf>,

    /// PDF URLs that could not be downloaded or written
    pub failed: Vec<String>,
}

impl DownloadSummary {
    pub fn total(&self) -> usize {
        self.downloaded.len() + self.failed.len()
    }
}

/// Downloads every document's PDF into `download_dir`
///
/// The directory is created if missing; failing to create it is the only
/// error returned. Per-file failures land in [`DownloadSummary::failed`].
pub async fn download_pdfs(
    fetcher: &Fetcher,
    throttle: &Throttle,
    documents: &[ApaDocument],
    download_dir: &Path,
    reporter: &dyn CrawlReporter,
) -> OutputResult<DownloadSummary> {
    std::fs::create_dir_all(download_dir)?;

    let mut summary = DownloadSummary::default();

    for (index, document) in documents.iter().enumerate() {
        if index > 0 {
            throttle.wait().await;
        }

        reporter.downloading(&document.pdf_url);

        match download_one(fetcher, &document.pdf_url, download_dir).await {
            Ok(path) => {
                reporter.download_completed(&path);
                summary.downloaded.push(path);
            }
            Err(e) => {
                reporter.download_failed(&document.pdf_url, &e);
                summary.failed.push(document.pdf_url.clone());
            }
        }
    }

    Ok(summary)
}

async fn download_one(
    fetcher: &Fetcher,
    pdf_url: &str,
    download_dir: &Path,
) -> OutputResult<PathBuf> {
    let bytes = fetcher.fetch_bytes(pdf_url).await?;

    let filename = pdf_filename(pdf_url, download_dir)?;
    let path = download_dir.join(filename);
    std::fs::write(&path, &bytes)?;

    Ok(path)
}

/// Chooses the local file name for a PDF URL
///
/// The last path segment is used when it ends in `.pdf`. Otherwise the
/// name is `apa_document_{n}.pdf`, where `n` is one more than the number of
/// entries already in `download_dir`.
pub fn pdf_filename(pdf_url: &str, download_dir: &Path) -> OutputResult<String> {
    if let Some(basename) = url_basename(pdf_url) {
        if basename.ends_with(".pdf") {
            return Ok(basename);
        }
    }

    let existing = std::fs::read_dir(download_dir)?.count();
    Ok(format!("apa_document_{}.pdf", existing + 1))
}

fn url_basename(pdf_url: &str) -> Option<String> {
    let url = Url::parse(pdf_url).ok()?;
    url.path()
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}
