//! Integration tests for batch processing.

use std::fs;
use std::path::Path;

use indicatif::ProgressBar;
use tempfile::TempDir;

use docalign_align::Aligner;
use docalign_cli::pipeline::{OutputConfig, process_document, run_batch};
use docalign_ingest::{SidecarRecognizer, list_documents};
use docalign_model::{AlignOptions, Template};
use docalign_report::read_report;

fn write(path: &Path, contents: &str) {
    fs::write(path, contents).expect("write file");
}

fn aligner(keys: &str) -> Aligner {
    let template = Template::parse(keys).expect("template");
    Aligner::from_template(&template, AlignOptions::default()).expect("aligner")
}

#[test]
fn failing_document_does_not_stop_batch() {
    let input = TempDir::new().expect("temp dir");
    let output = TempDir::new().expect("temp dir");
    write(&input.path().join("a.png"), "img");
    write(&input.path().join("a.txt"), "Name: Ada\nDate: 1815-12-10\n");
    write(&input.path().join("b.pdf"), "pdf");
    write(&input.path().join("c.jpg"), "img");
    write(
        &input.path().join("c.json"),
        r#"{"pages":[{"blocks":[{"lines":[{"words":[{"value":"Name"},{"value":":"},{"value":"Grace"}]}]}]}]}"#,
    );

    let documents = list_documents(input.path()).expect("list");
    assert_eq!(documents.len(), 3);

    let report = output.path().join("results.csv");
    let config = OutputConfig {
        output_dir: output.path().to_path_buf(),
        report: Some(report.clone()),
    };
    let summaries = run_batch(
        &documents,
        &SidecarRecognizer::new(),
        &aligner("Name\nDate\n"),
        &config,
        &ProgressBar::hidden(),
    );

    assert_eq!(summaries.len(), 3);
    assert!(summaries[0].is_ok());
    assert_eq!(summaries[0].filled, 2);
    assert!(!summaries[1].is_ok());
    assert!(summaries[1].error.as_deref().unwrap_or_default().contains("b.json"));
    assert!(summaries[2].is_ok());
    assert_eq!(summaries[2].filled, 1);

    let aligned = fs::read_to_string(output.path().join("a").join("aligned.txt")).expect("read");
    assert_eq!(aligned, "Name : Ada\nDate : 1815-12-10\n");
    assert!(!output.path().join("b").exists());

    let table = read_report(&report).expect("read report");
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.cell(0, "FileName"), "a");
    assert_eq!(table.cell(1, "FileName"), "c");
    assert_eq!(table.cell(1, "Name"), "Grace");
    assert_eq!(table.cell(1, "Date"), "");
}

#[test]
fn report_can_be_disabled() {
    let input = TempDir::new().expect("temp dir");
    let output = TempDir::new().expect("temp dir");
    let document = input.path().join("scan.png");
    write(&document, "img");
    write(&input.path().join("scan.txt"), "Total : 12.50\n");

    let config = OutputConfig {
        output_dir: output.path().to_path_buf(),
        report: None,
    };
    let summary = process_document(
        &document,
        &SidecarRecognizer::new(),
        &aligner("Total"),
        &config,
    )
    .expect("process");

    assert_eq!(summary.stem, "scan");
    assert_eq!(summary.lines, 1);
    assert_eq!(summary.output_dir, Some(output.path().join("scan")));
    let raw = fs::read_to_string(output.path().join("scan").join("raw_ocr.txt")).expect("read");
    assert_eq!(raw, "Total : 12.50");
    assert!(!output.path().join("results.csv").exists());
}
