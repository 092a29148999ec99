//! CLI argument definitions for docalign.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use docalign_model::{
    AlignOptions, DEFAULT_FUZZY_THRESHOLD, DuplicatePolicy, MatchPriority, ScorerKind,
};

#[derive(Parser)]
#[command(
    name = "docalign",
    version,
    about = "Align OCR text of scanned documents to a template of keys",
    long_about = "Align noisy OCR text of scanned documents to a fixed template of keys.\n\n\
                  Reads OCR output produced next to each document, extracts one value per \
                  template key and writes per-document text files plus a CSV report."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include extracted values in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Prefix log lines with a timestamp (always on with --log-file).
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Align every document in a folder and write outputs.
    Run(RunArgs),

    /// Align a single OCR dump and print the result.
    Align(AlignArgs),

    /// List the keys of a template.
    Keys(KeysArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Folder containing scanned documents (pdf, jpg, jpeg, png).
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Template file with one key per line.
    #[arg(long = "template", value_name = "FILE")]
    pub template: PathBuf,

    /// Output directory (default: <INPUT_DIR>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Folder holding OCR sidecar files (default: next to each document).
    #[arg(long = "ocr-dir", value_name = "DIR")]
    pub ocr_dir: Option<PathBuf>,

    /// CSV report path (default: <OUTPUT_DIR>/results.csv).
    #[arg(long = "report", value_name = "FILE", conflicts_with = "no_report")]
    pub report: Option<PathBuf>,

    /// Skip the CSV report.
    #[arg(long = "no-report")]
    pub no_report: bool,

    #[command(flatten)]
    pub alignment: AlignmentArgs,
}

#[derive(Parser)]
pub struct AlignArgs {
    /// OCR dump to align (.txt with one line per OCR line, or .json export).
    #[arg(value_name = "OCR_FILE")]
    pub ocr_file: PathBuf,

    /// Template file with one key per line.
    #[arg(long = "template", value_name = "FILE")]
    pub template: PathBuf,

    /// How to print the result.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: PrintFormatArg,

    #[command(flatten)]
    pub alignment: AlignmentArgs,
}

#[derive(Parser)]
pub struct KeysArgs {
    /// Template file with one key per line.
    #[arg(long = "template", value_name = "FILE")]
    pub template: PathBuf,
}

/// Flags shared by every command that aligns text.
#[derive(Args, Clone)]
pub struct AlignmentArgs {
    /// Which value to keep when a key appears more than once.
    #[arg(long = "duplicates", value_enum, default_value = "last")]
    pub duplicates: DuplicatesArg,

    /// Similarity used to match located labels to keys.
    #[arg(long = "scorer", value_enum, default_value = "token-sort")]
    pub scorer: ScorerArg,

    /// Prefer the longest key when several match at the same position.
    #[arg(long = "prefer-longest")]
    pub prefer_longest: bool,

    /// Minimum score (0-100) for labels recovered before a colon.
    #[arg(
        long = "fuzzy-threshold",
        value_name = "SCORE",
        default_value_t = DEFAULT_FUZZY_THRESHOLD,
        value_parser = parse_threshold
    )]
    pub fuzzy_threshold: f64,

    /// Only use labels that match a key's pattern exactly.
    #[arg(long = "no-fuzzy-locate")]
    pub no_fuzzy_locate: bool,
}

impl AlignmentArgs {
    pub fn to_options(&self) -> AlignOptions {
        AlignOptions::default()
            .with_duplicates(match self.duplicates {
                DuplicatesArg::Last => DuplicatePolicy::LastWins,
                DuplicatesArg::First => DuplicatePolicy::FirstWins,
                DuplicatesArg::Collect => DuplicatePolicy::Collect,
            })
            .with_scorer(match self.scorer {
                ScorerArg::TokenSort => ScorerKind::TokenSort,
                ScorerArg::JaroWinkler => ScorerKind::JaroWinkler,
            })
            .with_match_priority(if self.prefer_longest {
                MatchPriority::LongestKey
            } else {
                MatchPriority::DeclarationOrder
            })
            .with_fuzzy_locate((!self.no_fuzzy_locate).then_some(self.fuzzy_threshold))
    }
}

fn parse_threshold(value: &str) -> Result<f64, String> {
    let score: f64 = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    if (0.0..=100.0).contains(&score) {
        Ok(score)
    } else {
        Err(format!("`{value}` is outside 0-100"))
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DuplicatesArg {
    Last,
    First,
    Collect,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ScorerArg {
    TokenSort,
    JaroWinkler,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PrintFormatArg {
    Table,
    Text,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
