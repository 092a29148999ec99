//! Cumulative CSV report with one row per processed document.

use std::collections::HashMap;
use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use docalign_model::AlignmentResult;
use tracing::debug;

/// Default report file name inside the output directory.
pub const REPORT_FILE_NAME: &str = "results.csv";

/// First column of every report row.
pub const FILE_NAME_COLUMN: &str = "FileName";

/// Appended to a key's column name when an earlier column already uses it.
pub const KEY_COLUMN_SUFFIX: &str = " (key)";

/// Appends one row for `file_name` to the report at `path`.
///
/// The header is `FileName` followed by the template keys; a key named
/// `FileName` is written as `FileName (key)`. If the report already exists
/// with a different header it is rewritten with the union of both column
/// lists (existing columns first) and empty cells where a row has no value.
pub fn append_report_row(path: &Path, file_name: &str, result: &AlignmentResult) -> Result<()> {
    let cells = row_cells(file_name, result);
    let columns: Vec<String> = cells.iter().map(|(column, _)| column.clone()).collect();

    if !path.exists() {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
        let mut writer =
            csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;
        writer
            .write_record(&columns)
            .with_context(|| format!("write {}", path.display()))?;
        writer
            .write_record(row_for(&columns, &cells))
            .with_context(|| format!("write {}", path.display()))?;
        writer
            .flush()
            .with_context(|| format!("flush {}", path.display()))?;
        debug!(path = %path.display(), "created report");
        return Ok(());
    }

    let existing = read_report(path)?;
    if existing.headers == columns {
        let file = OpenOptions::new()
            .append(true)
            .open(path)
            .with_context(|| format!("open {}", path.display()))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer
            .write_record(row_for(&columns, &cells))
            .with_context(|| format!("append to {}", path.display()))?;
        writer
            .flush()
            .with_context(|| format!("flush {}", path.display()))?;
        debug!(path = %path.display(), "appended report row");
        return Ok(());
    }

    let mut merged = existing.headers.clone();
    for column in &columns {
        if !merged.contains(column) {
            merged.push(column.clone());
        }
    }

    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("rewrite {}", path.display()))?;
    writer
        .write_record(&merged)
        .with_context(|| format!("write {}", path.display()))?;
    for row in &existing.rows {
        let cells = merged
            .iter()
            .map(|column| row.get(column).map(String::as_str).unwrap_or(""));
        writer
            .write_record(cells)
            .with_context(|| format!("write {}", path.display()))?;
    }
    writer
        .write_record(row_for(&merged, &cells))
        .with_context(|| format!("write {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    debug!(
        path = %path.display(),
        column_count = merged.len(),
        "rewrote report with merged columns"
    );
    Ok(())
}

/// Rows of an existing report, keyed by column name.
#[derive(Debug, Default)]
pub struct ReportTable {
    pub headers: Vec<String>,
    pub rows: Vec<HashMap<String, String>>,
}

impl ReportTable {
    /// Cell value for `column` in row `index`, empty when absent.
    pub fn cell(&self, index: usize, column: &str) -> &str {
        self.rows
            .get(index)
            .and_then(|row| row.get(column))
            .map_or("", String::as_str)
    }
}

/// Reads a report written by [`append_report_row`].
pub fn read_report(path: &Path) -> Result<ReportTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("read {}", path.display()))?;

    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("read header of {}", path.display()))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("read {}", path.display()))?;
        let row = headers
            .iter()
            .zip(record.iter())
            .map(|(column, value)| (column.clone(), value.to_string()))
            .collect();
        rows.push(row);
    }

    Ok(ReportTable { headers, rows })
}

/// Column names paired with this document's values, file name first.
///
/// Column names are unique so that no key can shadow the file name.
fn row_cells<'a>(file_name: &'a str, result: &'a AlignmentResult) -> Vec<(String, &'a str)> {
    let mut cells = vec![(FILE_NAME_COLUMN.to_string(), file_name)];
    for field in result.fields() {
        let mut column = field.key.as_str().to_string();
        while cells.iter().any(|(taken, _)| *taken == column) {
            column.push_str(KEY_COLUMN_SUFFIX);
        }
        cells.push((column, field.value.as_str()));
    }
    cells
}

fn row_for<'a>(columns: &[String], cells: &[(String, &'a str)]) -> Vec<&'a str> {
    columns
        .iter()
        .map(|column| {
            cells
                .iter()
                .find(|(name, _)| name == column)
                .map_or("", |(_, value)| *value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use docalign_model::{AlignedField, TemplateKey};
    use tempfile::TempDir;

    fn result(pairs: &[(&str, &str)]) -> AlignmentResult {
        let fields = pairs
            .iter()
            .map(|(key, value)| AlignedField {
                key: TemplateKey::new(*key).unwrap(),
                value: (*value).to_string(),
            })
            .collect();
        AlignmentResult::new(fields, Vec::new())
    }

    #[test]
    fn creates_report_with_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(REPORT_FILE_NAME);
        append_report_row(&path, "scan_01", &result(&[("Name", "Ada"), ("Date", "")])).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "FileName,Name,Date\nscan_01,Ada,\n");
    }

    #[test]
    fn appends_rows_with_same_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(REPORT_FILE_NAME);
        append_report_row(&path, "a", &result(&[("Name", "Ada")])).unwrap();
        append_report_row(&path, "b", &result(&[("Name", "Grace, Hopper")])).unwrap();

        let table = read_report(&path).unwrap();
        assert_eq!(table.headers, vec!["FileName", "Name"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.cell(1, "Name"), "Grace, Hopper");
    }

    #[test]
    fn merges_columns_when_template_changes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(REPORT_FILE_NAME);
        append_report_row(&path, "a", &result(&[("Name", "Ada"), ("Date", "1815")])).unwrap();
        append_report_row(&path, "b", &result(&[("Total", "12"), ("Name", "Alan")])).unwrap();

        let table = read_report(&path).unwrap();
        assert_eq!(table.headers, vec!["FileName", "Name", "Date", "Total"]);
        assert_eq!(table.cell(0, "FileName"), "a");
        assert_eq!(table.cell(0, "Total"), "");
        assert_eq!(table.cell(1, "Date"), "");
        assert_eq!(table.cell(1, "Total"), "12");
        assert_eq!(table.cell(1, "Name"), "Alan");
    }

    #[test]
    fn key_named_like_file_column_keeps_file_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(REPORT_FILE_NAME);
        append_report_row(&path, "doc_a", &result(&[("FileName", "scan.pdf"), ("Date", "2024")]))
            .unwrap();
        append_report_row(&path, "doc_b", &result(&[("FileName", "copy.pdf"), ("Total", "9")]))
            .unwrap();

        let table = read_report(&path).unwrap();
        assert_eq!(table.headers, vec!["FileName", "FileName (key)", "Date", "Total"]);
        assert_eq!(table.cell(0, "FileName"), "doc_a");
        assert_eq!(table.cell(0, "FileName (key)"), "scan.pdf");
        assert_eq!(table.cell(0, "Date"), "2024");
        assert_eq!(table.cell(1, "FileName"), "doc_b");
        assert_eq!(table.cell(1, "FileName (key)"), "copy.pdf");
        assert_eq!(table.cell(1, "Total"), "9");
    }

    #[test]
    fn creates_missing_parent_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join(REPORT_FILE_NAME);
        append_report_row(&path, "a", &result(&[("Name", "Ada")])).unwrap();
        assert!(path.is_file());
    }
}
