//! OCR collaborator seam.
//!
//! Text recognition itself happens outside this workspace. A
//! [`TextRecognizer`] is constructed once by the orchestrator and passed by
//! reference to whatever needs lines for a document.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::discovery::document_stem;
use crate::error::{IngestError, Result};

/// Produces OCR text lines, in reading order, for a scanned document.
pub trait TextRecognizer: Send + Sync {
    fn recognize(&self, document: &Path) -> Result<Vec<String>>;

    /// Human-readable name for logs.
    fn name(&self) -> &str;
}

/// Reads OCR output that an external engine wrote next to each document.
///
/// For `scan.png` the recognizer looks for `scan.json` (a docTR-style
/// export) and then `scan.txt` (one OCR line per line) in the sidecar
/// directory, which defaults to the document's own directory.
#[derive(Debug, Clone, Default)]
pub struct SidecarRecognizer {
    dir: Option<PathBuf>,
}

impl SidecarRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.dir = dir;
        self
    }

    /// Candidate sidecar paths for `document`, in lookup order.
    pub fn sidecars(&self, document: &Path) -> [PathBuf; 2] {
        let dir = match &self.dir {
            Some(dir) => dir.clone(),
            None => document
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        };
        let stem = document_stem(document);
        [
            dir.join(format!("{stem}.json")),
            dir.join(format!("{stem}.txt")),
        ]
    }
}

impl TextRecognizer for SidecarRecognizer {
    fn recognize(&self, document: &Path) -> Result<Vec<String>> {
        if !document.exists() {
            return Err(IngestError::InputNotFound {
                path: document.to_path_buf(),
            });
        }
        let candidates = self.sidecars(document);
        let Some(sidecar) = candidates.iter().find(|path| path.is_file()) else {
            return Err(IngestError::InputNotFound {
                path: candidates[0].clone(),
            });
        };
        read_ocr_dump(sidecar)
    }

    fn name(&self) -> &str {
        "sidecar"
    }
}

/// Reads OCR lines from a `.json` export or a plain-text dump.
pub fn read_ocr_dump(path: &Path) -> Result<Vec<String>> {
    let raw = std::fs::read_to_string(path).map_err(|e| IngestError::io(path, e))?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let lines = if is_json {
        parse_export(&raw).map_err(|e| IngestError::DecodeFailure {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
    } else {
        parse_plain(&raw)
    };
    debug!(
        path = %path.display(),
        line_count = lines.len(),
        "read OCR output"
    );
    Ok(lines)
}

/// One line per input line, trimmed, blank lines dropped.
pub fn parse_plain(raw: &str) -> Vec<String> {
    raw.trim_start_matches('\u{feff}')
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Deserialize)]
struct Export {
    #[serde(default)]
    pages: Vec<ExportPage>,
}

#[derive(Debug, Deserialize)]
struct ExportPage {
    #[serde(default)]
    blocks: Vec<ExportBlock>,
}

#[derive(Debug, Deserialize)]
struct ExportBlock {
    #[serde(default)]
    lines: Vec<ExportLine>,
}

#[derive(Debug, Deserialize)]
struct ExportLine {
    #[serde(default)]
    words: Vec<ExportWord>,
}

#[derive(Debug, Deserialize)]
struct ExportWord {
    value: String,
}

/// Lines of the first page of a docTR-style export.
///
/// Words of a line are joined with one space; blank lines are dropped.
/// Later pages are ignored, matching the single-page rasterization upstream.
pub fn parse_export(raw: &str) -> serde_json::Result<Vec<String>> {
    let export: Export = serde_json::from_str(raw.trim_start_matches('\u{feff}'))?;
    if export.pages.len() > 1 {
        debug!(
            page_count = export.pages.len(),
            "ignoring pages after the first"
        );
    }
    let Some(page) = export.pages.into_iter().next() else {
        return Ok(Vec::new());
    };
    let mut lines = Vec::new();
    for block in page.blocks {
        for line in block.lines {
            let text = line
                .words
                .iter()
                .map(|word| word.value.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            let text = text.trim();
            if !text.is_empty() {
                lines.push(text.to_string());
            }
        }
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_dump_drops_blank_lines() {
        assert_eq!(
            parse_plain("Name: Ada\n\n   \n Date: 1815 \r\n"),
            vec!["Name: Ada", "Date: 1815"]
        );
    }

    #[test]
    fn export_joins_words_per_line() {
        let raw = r#"{
            "pages": [{
                "blocks": [
                    {"lines": [
                        {"words": [{"value": "Invoice", "confidence": 0.98}, {"value": "Number:"}]},
                        {"words": [{"value": "4471"}]}
                    ]},
                    {"lines": [{"words": []}, {"words": [{"value": "Total"}]}]}
                ]
            }]
        }"#;
        assert_eq!(
            parse_export(raw).unwrap(),
            vec!["Invoice Number:", "4471", "Total"]
        );
    }

    #[test]
    fn export_reads_first_page_only() {
        let raw = r#"{"pages": [
            {"blocks": [{"lines": [{"words": [{"value": "first"}]}]}]},
            {"blocks": [{"lines": [{"words": [{"value": "second"}]}]}]}
        ]}"#;
        assert_eq!(parse_export(raw).unwrap(), vec!["first"]);
    }

    #[test]
    fn export_without_pages_is_empty() {
        assert!(parse_export("{}").unwrap().is_empty());
    }

    #[test]
    fn malformed_export_is_an_error() {
        assert!(parse_export("{\"pages\": [").is_err());
    }
}
