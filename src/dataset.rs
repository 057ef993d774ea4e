//! Reads the tabular city dataset into raw rows for the catalog.

use std::path::Path;

use anyhow::{Context, Result};

use crate::catalog::{CityCatalog, RawRow};

/// Loads a CSV dataset from disk and builds the catalog.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<CityCatalog> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset {}", path.display()))?;
    let rows = parse_rows(&text)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    let catalog = CityCatalog::from_rows(&rows)
        .with_context(|| format!("Unusable dataset {}", path.display()))?;
    Ok(catalog)
}

/// Parses CSV text into ordered header-keyed rows. Field values are trimmed
/// here so the catalog only ever sees clean text.
pub fn parse_rows(text: &str) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers().context("dataset has no header row")?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("malformed CSV record")?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(header, field)| (header.to_string(), field.to_string()))
            .collect();
        if !row.is_empty() {
            rows.push(row);
        }
    }
    Ok(rows)
}
