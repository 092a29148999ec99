use std::time::Instant;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, info_span, warn};

use docalign_align::Aligner;
use docalign_cli::pipeline::{OutputConfig, run_batch};
use docalign_cli::types::BatchResult;
use docalign_ingest::{SidecarRecognizer, list_documents, load_template, read_ocr_dump};
use docalign_report::{REPORT_FILE_NAME, render_aligned};

use crate::cli::{AlignArgs, KeysArgs, PrintFormatArg, RunArgs};
use crate::summary::{print_alignment, print_keys};

pub fn run_batch_command(args: &RunArgs, show_progress: bool) -> Result<BatchResult> {
    let input_dir = &args.input_dir;
    let run_span = info_span!("run", input_dir = %input_dir.display());
    let _run_guard = run_span.enter();
    let start = Instant::now();

    let template = load_template(&args.template).context("load template")?;
    let options = args.alignment.to_options();
    let aligner = Aligner::from_template(&template, options).context("build key pattern")?;
    let documents = list_documents(input_dir).context("list input documents")?;

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| input_dir.join("output"));
    let report = if args.no_report {
        None
    } else {
        Some(
            args.report
                .clone()
                .unwrap_or_else(|| output_dir.join(REPORT_FILE_NAME)),
        )
    };
    let config = OutputConfig {
        output_dir: output_dir.clone(),
        report: report.clone(),
    };

    info!(
        document_count = documents.len(),
        key_count = template.len(),
        duration_ms = start.elapsed().as_millis(),
        "discovered documents"
    );
    if documents.is_empty() {
        warn!(input_dir = %input_dir.display(), "no documents found");
    }

    let recognizer = SidecarRecognizer::new().with_dir(args.ocr_dir.clone());
    let progress = progress_bar(documents.len(), show_progress);
    let summaries = run_batch(&documents, &recognizer, &aligner, &config, &progress);
    let has_errors = summaries.iter().any(|summary| !summary.is_ok());

    Ok(BatchResult {
        input_dir: input_dir.clone(),
        output_dir,
        report,
        documents: summaries,
        has_errors,
    })
}

pub fn run_align(args: &AlignArgs) -> Result<()> {
    let template = load_template(&args.template).context("load template")?;
    let aligner =
        Aligner::from_template(&template, args.alignment.to_options()).context("build key pattern")?;
    let lines = read_ocr_dump(&args.ocr_file)
        .with_context(|| format!("read {}", args.ocr_file.display()))?;
    let result = aligner.align(&lines);

    match args.format {
        PrintFormatArg::Table => print_alignment(&result),
        PrintFormatArg::Text => print!("{}", render_aligned(&result)),
        PrintFormatArg::Json => {
            let json = serde_json::to_string_pretty(&result).context("serialize result")?;
            println!("{json}");
        }
    }
    Ok(())
}

pub fn run_keys(args: &KeysArgs) -> Result<()> {
    let template = load_template(&args.template).context("load template")?;
    print_keys(&template);
    Ok(())
}

fn progress_bar(len: usize, visible: bool) -> ProgressBar {
    if !visible || len == 0 {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        bar.set_style(style.progress_chars("█▓▒░  "));
    }
    bar
}
