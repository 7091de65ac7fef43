//! JSON reports
//!
//! `apa_documents.json` carries one record per resolved PDF;
//! `apa_titles.json` carries the sorted list of collected titles.

use crate::OutputResult;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Metadata for one resolved ruling
///
/// Created once a PDF has been resolved for an intermediate page and never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApaDocument {
    pub title: String,
    pub intermediate_url: String,
    pub pdf_url: String,
    pub date_found: String,
}

/// Top-level shape of `apa_documents.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentReport {
    pub crawl_date: String,
    pub base_url: String,
    pub total_documents: usize,
    pub documents: Vec<ApaDocument>,
}

impl DocumentReport {
    /// Builds a report stamped with the current local time
    pub fn new(base_url: &str, documents: &[ApaDocument]) -> Self {
        Self {
            crawl_date: timestamp_now(),
            base_url: base_url.to_string(),
            total_documents: documents.len(),
            documents: documents.to_vec(),
        }
    }
}

/// Top-level shape of `apa_titles.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleReport {
    pub titles: Vec<String>,
}

impl TitleReport {
    /// Builds a report; titles are sorted and deduplicated
    pub fn new<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut titles: Vec<String> = titles.into_iter().map(Into::into).collect();
        titles.sort();
        titles.dedup();
        Self { titles }
    }
}

/// Local ISO-8601 timestamp with microseconds, e.g. `2024-05-01T14:03:12.123456`
pub fn timestamp_now() -> String {
    chrono::Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

/// Writes the document report as pretty-printed UTF-8 JSON
pub fn save_documents(report: &DocumentReport, path: &Path) -> OutputResult<()> {
    write_json(report, path)
}

/// Reads a document report written by [`save_documents`]
pub fn load_documents(path: &Path) -> OutputResult<DocumentReport> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Writes the title report as pretty-printed UTF-8 JSON
pub fn save_titles(report: &TitleReport, path: &Path) -> OutputResult<()> {
    write_json(report, path)
}

/// Reads a title report written by [`save_titles`]
pub fn load_titles(path: &Path) -> OutputResult<TitleReport> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

fn write_json<T: Serialize>(value: &T, path: &Path) -> OutputResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
