//! Per-document processing and batch orchestration.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use tracing::{debug, info, info_span, trace, warn};

use docalign_align::Aligner;
use docalign_ingest::{TextRecognizer, document_stem};
use docalign_report::{append_report_row, write_document_outputs};

use crate::logging::redact_value;
use crate::types::DocumentSummary;

/// Where a batch writes its outputs.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub output_dir: PathBuf,
    /// Cumulative CSV report; `None` disables it.
    pub report: Option<PathBuf>,
}

/// Recognizes, aligns and writes outputs for one document.
pub fn process_document(
    path: &Path,
    recognizer: &dyn TextRecognizer,
    aligner: &Aligner,
    config: &OutputConfig,
) -> Result<DocumentSummary> {
    let stem = document_stem(path);
    let document_span = info_span!("document", file = %stem);
    let _document_guard = document_span.enter();
    let start = Instant::now();

    let lines = recognizer
        .recognize(path)
        .with_context(|| format!("recognize {}", path.display()))?;
    debug!(
        recognizer = recognizer.name(),
        line_count = lines.len(),
        "recognized text"
    );

    let result = aligner.align(&lines);
    for (key, value) in result.iter() {
        trace!(key = %key, value = redact_value(value), "aligned field");
    }

    let outputs = write_document_outputs(&config.output_dir, &stem, &lines, &result)
        .with_context(|| format!("write outputs for {stem}"))?;
    if let Some(report) = &config.report {
        append_report_row(report, &stem, &result)
            .with_context(|| format!("update report {}", report.display()))?;
    }

    info!(
        line_count = lines.len(),
        filled = result.filled_count(),
        keys = result.len(),
        duration_ms = start.elapsed().as_millis(),
        "document aligned"
    );

    Ok(DocumentSummary {
        stem,
        source: path.to_path_buf(),
        lines: lines.len(),
        filled: result.filled_count(),
        keys: result.len(),
        output_dir: Some(outputs.dir),
        error: None,
    })
}

/// Processes every document in order.
///
/// A failing document is logged and recorded in its summary; the remaining
/// documents are still processed.
pub fn run_batch(
    documents: &[PathBuf],
    recognizer: &dyn TextRecognizer,
    aligner: &Aligner,
    config: &OutputConfig,
    progress: &ProgressBar,
) -> Vec<DocumentSummary> {
    let batch_span = info_span!("batch", document_count = documents.len());
    let _batch_guard = batch_span.enter();
    let start = Instant::now();

    let mut summaries = Vec::with_capacity(documents.len());
    for path in documents {
        let stem = document_stem(path);
        progress.set_message(stem.clone());
        let summary = match process_document(path, recognizer, aligner, config) {
            Ok(summary) => summary,
            Err(error) => {
                warn!(file = %stem, error = %format!("{error:#}"), "document failed");
                DocumentSummary::failed(
                    stem,
                    path.clone(),
                    aligner.keys().len(),
                    format!("{error:#}"),
                )
            }
        };
        summaries.push(summary);
        progress.inc(1);
    }
    progress.finish_and_clear();

    let failed = summaries.iter().filter(|doc| !doc.is_ok()).count();
    info!(
        processed = summaries.len() - failed,
        failed,
        duration_ms = start.elapsed().as_millis(),
        "batch complete"
    );
    summaries
}
