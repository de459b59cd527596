use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::parser::PageFields;

/// Written in place of any field that could not be extracted.
pub const NOT_AVAILABLE: &str = "N/A";

pub const COLUMNS: [&str; 4] = ["Cluster Name", "Description", "Video URL", "Transcript"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterResult {
    pub name: String,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub transcript: Option<String>,
}

impl ClusterResult {
    pub fn new(name: String, fields: PageFields) -> Self {
        ClusterResult {
            name,
            description: fields.description,
            video_url: fields.video_url,
            transcript: fields.transcript,
        }
    }
}

#[derive(Serialize)]
struct OutputRow<'a> {
    name: &'a str,
    description: &'a str,
    video_url: &'a str,
    transcript: &'a str,
}

impl<'a> From<&'a ClusterResult> for OutputRow<'a> {
    fn from(r: &'a ClusterResult) -> Self {
        OutputRow {
            name: &r.name,
            description: or_na(&r.description),
            video_url: or_na(&r.video_url),
            transcript: or_na(&r.transcript),
        }
    }
}

fn or_na(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(NOT_AVAILABLE)
}

/// Write results as CSV, creating missing parent directories and replacing
/// any existing file.
pub fn write_results(path: &Path, results: &[ClusterResult]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory {:?}", parent))?;
        }
    }

    let file = fs::File::create(path)
        .with_context(|| format!("Failed to create output file {:?}", path))?;
    write_results_to(file, results).with_context(|| format!("Failed to write {:?}", path))
}

pub fn write_results_to<W: io::Write>(sink: W, results: &[ClusterResult]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(sink);

    // header goes out even when there are no rows
    writer.write_record(COLUMNS)?;
    for result in results {
        writer.serialize(OutputRow::from(result))?;
    }
    writer.flush()?;
    Ok(())
}
