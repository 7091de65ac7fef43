//! Output module for crawl results
//!
//! This module handles:
//! - The document and title records and their JSON reports
//! - Downloading resolved PDFs to disk
//! - The reporting interface crawlers announce their progress through

mod download;
mod report;
mod traits;

pub use download::{download_pdfs, pdf_filename, DownloadSummary};
pub use report::{
    load_documents, load_titles, save_documents, save_titles, timestamp_now, ApaDocument,
    DocumentReport, TitleReport,
};
pub use traits::{CrawlReporter, TracingReporter};
