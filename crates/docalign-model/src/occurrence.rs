//! Label occurrences located in normalized OCR text.

use serde::{Deserialize, Serialize};

use crate::TemplateKey;

/// How an occurrence was located.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOrigin {
    /// Matched by the whitespace-flexible, case-insensitive key pattern.
    Exact,
    /// Recovered from the tokens in front of an unclaimed `" : "` separator.
    Fuzzy,
}

/// A label-shaped substring of the normalized text, before key assignment.
///
/// Offsets are byte offsets into the normalized text, `start..end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub origin: MatchOrigin,
}

impl Occurrence {
    pub fn new(text: impl Into<String>, start: usize, end: usize, origin: MatchOrigin) -> Self {
        Self {
            text: text.into(),
            start,
            end,
            origin,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end || self.text.is_empty()
    }
}

/// An occurrence reassigned to its best-scoring template key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedOccurrence {
    pub key: TemplateKey,
    pub start: usize,
    pub end: usize,
    /// Similarity (0-100) between the matched text and `key`.
    pub score: f64,
    pub origin: MatchOrigin,
}
