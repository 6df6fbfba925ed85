//! Output formatting and persistence for analysis results.
//!
//! Supports pretty-printing, JSON serialization, CSV export of tables and
//! CSV append of summary records.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::stats::AnalysisSummary;
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// Logs the summary using Rust's debug pretty-print format.
pub fn print_pretty(summary: &AnalysisSummary) {
    debug!("{:#?}", summary);
}

/// Logs the summary as pretty-printed JSON.
pub fn print_json(summary: &AnalysisSummary) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

/// Appends an [`AnalysisSummary`] record as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &str, summary: &AnalysisSummary) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        // a summary file that already exists has its header row
        .has_headers(!file_exists)
        .from_writer(file);

    writer.serialize(summary)?;
    writer.flush()?;

    Ok(())
}

/// Writes `rows` to a fresh CSV file at `path`, header first.
pub fn write_records<T: Serialize>(path: &str, rows: &[T]) -> Result<()> {
    let mut writer = WriterBuilder::new().from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!(path, rows = rows.len(), "CSV table written");
    Ok(())
}
