//! Assignment of located occurrences to template keys.

use docalign_model::{Occurrence, ResolvedOccurrence, TemplateKey};
use tracing::trace;

use crate::score::{Similarity, best_match};

/// Reassigns each occurrence to its best-scoring key, preserving order.
///
/// The locator only proposes candidates; the key is always the one the scorer
/// ranks highest, even when that score is low. Empty occurrences are dropped.
pub fn resolve(
    occurrences: &[Occurrence],
    keys: &[TemplateKey],
    scorer: &dyn Similarity,
) -> Vec<ResolvedOccurrence> {
    if keys.is_empty() {
        return Vec::new();
    }
    let mut resolved = Vec::with_capacity(occurrences.len());
    for occurrence in occurrences {
        if occurrence.is_empty() {
            continue;
        }
        let Some((idx, score)) = best_match(&occurrence.text, keys, scorer) else {
            continue;
        };
        let key = keys[idx].clone();
        trace!(
            key = %key,
            start = occurrence.start,
            end = occurrence.end,
            score,
            origin = ?occurrence.origin,
            "resolved occurrence"
        );
        resolved.push(ResolvedOccurrence {
            key,
            start: occurrence.start,
            end: occurrence.end,
            score,
            origin: occurrence.origin,
        });
    }
    resolved
}
