//! Per-document output files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use docalign_model::AlignmentResult;
use tracing::debug;

/// File name of the rendered key/value listing.
pub const ALIGNED_FILE_NAME: &str = "aligned.txt";

/// File name of the raw OCR lines.
pub const RAW_OCR_FILE_NAME: &str = "raw_ocr.txt";

/// Paths written for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOutputs {
    pub dir: PathBuf,
    pub aligned: PathBuf,
    pub raw_ocr: PathBuf,
}

/// Renders one `key : value` line per template key, in template order.
pub fn render_aligned(result: &AlignmentResult) -> String {
    let mut out = String::new();
    for (key, value) in result.iter() {
        out.push_str(key.as_str());
        out.push_str(" : ");
        out.push_str(value.trim());
        out.push('\n');
    }
    out
}

/// Writes `aligned.txt` and `raw_ocr.txt` under `<output_dir>/<stem>/`.
pub fn write_document_outputs(
    output_dir: &Path,
    stem: &str,
    lines: &[String],
    result: &AlignmentResult,
) -> Result<DocumentOutputs> {
    let dir = output_dir.join(stem);
    std::fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;

    let raw_ocr = dir.join(RAW_OCR_FILE_NAME);
    std::fs::write(&raw_ocr, lines.join("\n"))
        .with_context(|| format!("write {}", raw_ocr.display()))?;

    let aligned = dir.join(ALIGNED_FILE_NAME);
    std::fs::write(&aligned, render_aligned(result))
        .with_context(|| format!("write {}", aligned.display()))?;

    debug!(dir = %dir.display(), "wrote document outputs");
    Ok(DocumentOutputs {
        dir,
        aligned,
        raw_ocr,
    })
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
    fn renders_in_template_order() {
        let rendered = render_aligned(&result(&[
            ("Invoice Number", "4471"),
            ("Date", " 2024-01-01 "),
            ("Total", "12.50"),
        ]));
        insta::assert_snapshot!(rendered, @r"
        Invoice Number : 4471
        Date : 2024-01-01
        Total : 12.50
        ");
    }

    #[test]
    fn empty_values_keep_their_line() {
        let rendered = render_aligned(&result(&[("Name", "")]));
        assert_eq!(rendered, "Name : \n");
    }

    #[test]
    fn writes_both_files_under_stem_dir() {
        let out = TempDir::new().unwrap();
        let lines = vec!["Total: 12.50".to_string(), "thanks".to_string()];
        let written =
            write_document_outputs(out.path(), "scan_01", &lines, &result(&[("Total", "12.50")]))
                .unwrap();

        assert_eq!(written.dir, out.path().join("scan_01"));
        assert_eq!(
            std::fs::read_to_string(&written.raw_ocr).unwrap(),
            "Total: 12.50\nthanks"
        );
        assert_eq!(
            std::fs::read_to_string(&written.aligned).unwrap(),
            "Total : 12.50\n"
        );
    }
}
