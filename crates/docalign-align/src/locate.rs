//! Locating label-shaped substrings in normalized text.
//!
//! The exact pass compiles every key into one case-insensitive alternation in
//! which the key's internal whitespace matches zero or more whitespace
//! characters. The regex crate uses leftmost-first semantics: the earliest
//! match in the text wins, and at equal positions the first alternative in
//! the pattern wins. Alternative order is decided by [`MatchPriority`].
//!
//! The fuzzy pass looks at canonical separators that no exact match claimed
//! and scores the tokens right in front of them against the keys.

use regex::{Regex, RegexBuilder};

use docalign_model::{MatchOrigin, MatchPriority, Occurrence, TemplateKey};

use crate::error::AlignError;
use crate::normalize::{normalize_text, separators};
use crate::score::{Similarity, best_match};

const PATTERN_SIZE_LIMIT: usize = 64 * (1 << 20);

/// Compiled exact-match pattern for one template.
#[derive(Debug, Clone)]
pub struct Locator {
    pattern: Option<Regex>,
}

impl Locator {
    /// Compiles the alternation for `keys`.
    ///
    /// Keys whose pattern would be empty are skipped. With no usable key the
    /// locator matches nothing.
    pub fn new(keys: &[TemplateKey], priority: MatchPriority) -> Result<Self, AlignError> {
        let mut ordered: Vec<&TemplateKey> = keys.iter().collect();
        if priority == MatchPriority::LongestKey {
            ordered.sort_by_key(|key| std::cmp::Reverse(key.as_str().chars().count()));
        }
        let alternatives: Vec<String> = ordered
            .into_iter()
            .filter_map(|key| key_pattern(key.as_str()))
            .collect();
        if alternatives.is_empty() {
            return Ok(Self { pattern: None });
        }
        let pattern = RegexBuilder::new(&alternatives.join("|"))
            .case_insensitive(true)
            .size_limit(PATTERN_SIZE_LIMIT)
            .build()?;
        Ok(Self {
            pattern: Some(pattern),
        })
    }

    /// Non-overlapping exact occurrences in ascending start order.
    pub fn locate(&self, text: &str) -> Vec<Occurrence> {
        let Some(pattern) = &self.pattern else {
            return Vec::new();
        };
        pattern
            .find_iter(text)
            .filter(|m| m.start() < m.end())
            .map(|m| Occurrence::new(m.as_str(), m.start(), m.end(), MatchOrigin::Exact))
            .collect()
    }
}

/// Locates exact occurrences of `keys` in `text` with declaration-order priority.
pub fn locate(text: &str, keys: &[TemplateKey]) -> Result<Vec<Occurrence>, AlignError> {
    Ok(Locator::new(keys, MatchPriority::DeclarationOrder)?.locate(text))
}

/// Pattern for a single key, or `None` when nothing would be left to match.
///
/// The key goes through the same separator canonicalization as the text, so a
/// key written as `"Name:"` still finds `"Name : "`.
fn key_pattern(key: &str) -> Option<String> {
    let canonical = normalize_text(key);
    let parts: Vec<String> = canonical.split_whitespace().map(regex::escape).collect();
    if parts.is_empty() {
        return None;
    }
    Some(parts.join(r"\s*"))
}

/// Recovers labels whose characters OCR corrupted.
///
/// For every separator not claimed by an exact occurrence, windows of the
/// last `1..=max_tokens` tokens before it are scored against all keys, where
/// `max_tokens` is the longest key's token count plus one. Windows never
/// reach back past the previous separator or occurrence. The best window
/// (ties: fewer tokens) is kept when it scores at least `threshold`.
pub fn locate_fuzzy(
    text: &str,
    exact: &[Occurrence],
    keys: &[TemplateKey],
    scorer: &dyn Similarity,
    threshold: f64,
) -> Vec<Occurrence> {
    let Some(longest) = keys.iter().map(TemplateKey::token_count).max() else {
        return Vec::new();
    };
    let max_tokens = longest + 1;
    let mut found = Vec::new();
    let mut boundary = 0usize;
    let mut next_exact = 0usize;

    for (sep_start, sep_end) in separators(text) {
        let mut claimed = false;
        while let Some(occurrence) = exact.get(next_exact) {
            if occurrence.start >= sep_end {
                break;
            }
            boundary = boundary.max(occurrence.end);
            if occurrence.end >= sep_start {
                claimed = true;
            }
            next_exact += 1;
        }
        if claimed || boundary >= sep_start {
            boundary = boundary.max(sep_end);
            continue;
        }

        let tokens = token_spans(text, boundary, sep_start);
        let mut best: Option<(f64, usize, usize)> = None;
        for count in 1..=max_tokens.min(tokens.len()) {
            let start = tokens[tokens.len() - count].0;
            let end = tokens[tokens.len() - 1].1;
            let Some((_, score)) = best_match(&text[start..end], keys, scorer) else {
                continue;
            };
            if best.is_none_or(|(current, _, _)| score > current) {
                best = Some((score, start, end));
            }
        }
        if let Some((score, start, end)) = best
            && score >= threshold
        {
            found.push(Occurrence::new(
                &text[start..end],
                start,
                end,
                MatchOrigin::Fuzzy,
            ));
        }
        boundary = sep_end;
    }

    found
}

/// Merges two start-ordered occurrence lists.
pub fn merge_occurrences(exact: Vec<Occurrence>, fuzzy: Vec<Occurrence>) -> Vec<Occurrence> {
    if fuzzy.is_empty() {
        return exact;
    }
    let mut merged = exact;
    merged.extend(fuzzy);
    merged.sort_by_key(|occurrence| occurrence.start);
    merged
}

/// Byte spans of whitespace-separated tokens in `text[from..to]`.
fn token_spans(text: &str, from: usize, to: usize) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut current: Option<usize> = None;
    for (offset, ch) in text[from..to].char_indices() {
        let pos = from + offset;
        if ch.is_whitespace() {
            if let Some(start) = current.take() {
                spans.push((start, pos));
            }
        } else if current.is_none() {
            current = Some(pos);
        }
    }
    if let Some(start) = current {
        spans.push((start, to));
    }
    spans
}
