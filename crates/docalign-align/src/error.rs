//! Error types for alignment.

use thiserror::Error;

/// Errors from building an aligner.
///
/// Aligning a document never fails once the aligner exists.
#[derive(Debug, Error)]
pub enum AlignError {
    /// The key alternation exceeded the regex size limits.
    #[error("failed to compile label pattern: {0}")]
    Pattern(#[from] regex::Error),
}
