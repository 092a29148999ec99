//! Token-order-insensitive string similarity.
//!
//! Scores are in `0.0..=100.0`. Both inputs are processed the same way
//! before comparison: lowercased, punctuation replaced by spaces, tokens
//! sorted and re-joined, so `"Full Name"` and `"name: full"` compare equal.

use std::cmp::Ordering;

use rapidfuzz::distance::{indel, jaro_winkler};

use docalign_model::{ScorerKind, TemplateKey};

/// A similarity function between a located label and a template key.
pub trait Similarity: Send + Sync {
    /// Similarity of `a` and `b` in `0.0..=100.0`.
    fn score(&self, a: &str, b: &str) -> f64;

    /// Short identifier for logs.
    fn name(&self) -> &'static str;
}

/// Normalized Indel similarity over sorted tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenSortRatio;

impl Similarity for TokenSortRatio {
    fn score(&self, a: &str, b: &str) -> f64 {
        let (a, b) = (sorted_tokens(a), sorted_tokens(b));
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }
        indel::normalized_similarity(a.chars(), b.chars()) * 100.0
    }

    fn name(&self) -> &'static str {
        "token-sort"
    }
}

/// Jaro-Winkler similarity over sorted tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct JaroWinklerRatio;

impl Similarity for JaroWinklerRatio {
    fn score(&self, a: &str, b: &str) -> f64 {
        let (a, b) = (sorted_tokens(a), sorted_tokens(b));
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }
        jaro_winkler::similarity(a.chars(), b.chars()) * 100.0
    }

    fn name(&self) -> &'static str {
        "jaro-winkler"
    }
}

/// Builds the scorer selected in the options.
pub fn scorer_for(kind: ScorerKind) -> Box<dyn Similarity> {
    match kind {
        ScorerKind::TokenSort => Box::new(TokenSortRatio),
        ScorerKind::JaroWinkler => Box::new(JaroWinklerRatio),
    }
}

/// Index and score of the best-scoring key for `query`.
///
/// Equal scores are broken by [`literal_similarity`], so keys that differ
/// only in symbols (`"Phone #"`, `"Phone"`) stay distinguishable. Remaining
/// ties go to the key declared first. Returns `None` when `keys` is empty.
pub fn best_match(
    query: &str,
    keys: &[TemplateKey],
    scorer: &dyn Similarity,
) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64, f64)> = None;
    for (idx, key) in keys.iter().enumerate() {
        let score = scorer.score(query, key.as_str());
        let literal = literal_similarity(query, key.as_str());
        let replace = match best {
            None => true,
            Some((_, current, current_literal)) => match score.total_cmp(&current) {
                Ordering::Greater => true,
                Ordering::Equal => literal > current_literal,
                Ordering::Less => false,
            },
        };
        if replace {
            best = Some((idx, score, literal));
        }
    }
    best.map(|(idx, score, _)| (idx, score))
}

/// Indel similarity of the lowercased, token-sorted strings with punctuation
/// kept. Used only to rank keys whose processed forms tie.
pub fn literal_similarity(a: &str, b: &str) -> f64 {
    let (a, b) = (literal_tokens(a), literal_tokens(b));
    indel::normalized_similarity(a.chars(), b.chars())
}

fn literal_tokens(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let mut tokens: Vec<&str> = lowered.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Lowercases, turns non-alphanumerics into separators and sorts the tokens.
pub fn sorted_tokens(raw: &str) -> String {
    let mut lowered = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if ch.is_alphanumeric() {
            lowered.extend(ch.to_lowercase());
        } else {
            lowered.push(' ');
        }
    }
    let mut tokens: Vec<&str> = lowered.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(values: &[&str]) -> Vec<TemplateKey> {
        values.iter().map(|v| TemplateKey::new(*v).unwrap()).collect()
    }

    #[test]
    fn sorted_tokens_ignores_case_order_and_punctuation() {
        assert_eq!(sorted_tokens("Full Name"), "full name");
        assert_eq!(sorted_tokens("name: FULL"), "full name");
        assert_eq!(sorted_tokens(" : - "), "");
    }

    #[test]
    fn identical_labels_score_100() {
        assert!((TokenSortRatio.score("Invoice Number", "invoice number") - 100.0).abs() < 1e-9);
        assert!((JaroWinklerRatio.score("Invoice Number", "INVOICE NUMBER") - 100.0).abs() < 1e-9);
    }

    #[test]
    fn token_order_does_not_matter() {
        let forward = TokenSortRatio.score("Full Name", "Full Name");
        let reversed = TokenSortRatio.score("name full", "Full Name");
        assert!((forward - reversed).abs() < 1e-9);
    }

    #[test]
    fn empty_side_scores_zero() {
        assert_eq!(TokenSortRatio.score("", "Name"), 0.0);
        assert_eq!(JaroWinklerRatio.score("Name", "--"), 0.0);
    }

    #[test]
    fn ocr_corruption_still_scores_high() {
        let score = TokenSortRatio.score("lnvoice Nurnber", "Invoice Number");
        assert!(score > 80.0, "expected > 80, got {score}");
    }

    #[test]
    fn best_match_prefers_closest_key() {
        let keys = keys(&["Name", "Invoice Number", "Date"]);
        let (idx, _) = best_match("lnvoice Nurnber", &keys, &TokenSortRatio).unwrap();
        assert_eq!(idx, 1);
    }

    #[test]
    fn best_match_ties_go_to_first_key() {
        let keys = keys(&["Total", "total"]);
        let (idx, score) = best_match("TOTAL", &keys, &TokenSortRatio).unwrap();
        assert_eq!(idx, 0);
        assert!((score - 100.0).abs() < 1e-9);
    }

    #[test]
    fn best_match_separates_keys_differing_by_symbols() {
        let phones = keys(&["Phone #", "Phone"]);
        assert_eq!(best_match("Phone", &phones, &TokenSortRatio).map(|(idx, _)| idx), Some(1));
        assert_eq!(best_match("Phone #", &phones, &TokenSortRatio).map(|(idx, _)| idx), Some(0));

        let prices = keys(&["Price ($)", "Price (€)"]);
        assert_eq!(best_match("price (€)", &prices, &JaroWinklerRatio).map(|(idx, _)| idx), Some(1));
    }

    #[test]
    fn literal_similarity_keeps_punctuation() {
        assert!((literal_similarity("Phone", "phone") - 1.0).abs() < 1e-9);
        assert!(literal_similarity("Phone", "Phone #") < 1.0);
    }

    #[test]
    fn best_match_without_keys() {
        assert!(best_match("Name", &[], &TokenSortRatio).is_none());
    }
}
