//! Carving value spans between resolved label occurrences.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use docalign_model::{AlignedField, DuplicatePolicy, ResolvedOccurrence, TemplateKey};

/// Separator used by [`DuplicatePolicy::Collect`].
pub const COLLECT_SEPARATOR: &str = "; ";

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("whitespace pattern is valid"));

/// Builds one field per distinct key from the spans between occurrences.
///
/// The span of occurrence `i` runs from its end to the start of occurrence
/// `i + 1`, or to the end of `text` for the last one. Keys without an
/// occurrence get an empty value. When `keys` repeats a label, the first
/// declaration owns the field.
pub fn partition(
    text: &str,
    resolved: &[ResolvedOccurrence],
    keys: &[TemplateKey],
    policy: DuplicatePolicy,
) -> Vec<AlignedField> {
    let mut fields: Vec<AlignedField> = Vec::with_capacity(keys.len());
    let mut slots: BTreeMap<&str, usize> = BTreeMap::new();
    for key in keys {
        if slots.contains_key(key.as_str()) {
            continue;
        }
        slots.insert(key.as_str(), fields.len());
        fields.push(AlignedField {
            key: key.clone(),
            value: String::new(),
        });
    }

    let mut assigned = vec![false; fields.len()];
    for (idx, occurrence) in resolved.iter().enumerate() {
        let Some(&slot) = slots.get(occurrence.key.as_str()) else {
            continue;
        };
        let end = resolved
            .get(idx + 1)
            .map_or(text.len(), |next| next.start);
        let value = span_value(text, occurrence.end, end);
        let field = &mut fields[slot];
        match policy {
            DuplicatePolicy::LastWins => field.value = value,
            DuplicatePolicy::FirstWins => {
                if !assigned[slot] {
                    field.value = value;
                }
            }
            DuplicatePolicy::Collect => {
                if !value.is_empty() {
                    if !field.value.is_empty() {
                        field.value.push_str(COLLECT_SEPARATOR);
                    }
                    field.value.push_str(&value);
                }
            }
        }
        assigned[slot] = true;
    }
    fields
}

/// Trims boundary noise (whitespace, colons, hyphens) and collapses
/// internal whitespace runs to one space.
pub fn clean_value(raw: &str) -> String {
    let trimmed = raw.trim_matches(|ch: char| ch.is_whitespace() || ch == ':' || ch == '-');
    WHITESPACE_RUN.replace_all(trimmed, " ").into_owned()
}

fn span_value(text: &str, start: usize, end: usize) -> String {
    if start >= end || end > text.len() {
        return String::new();
    }
    text.get(start..end).map(clean_value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use docalign_model::MatchOrigin;

    fn key(value: &str) -> TemplateKey {
        TemplateKey::new(value).unwrap()
    }

    fn occurrence(label: &str, start: usize, end: usize) -> ResolvedOccurrence {
        ResolvedOccurrence {
            key: key(label),
            start,
            end,
            score: 100.0,
            origin: MatchOrigin::Exact,
        }
    }

    fn values(fields: &[AlignedField]) -> Vec<(&str, &str)> {
        fields
            .iter()
            .map(|f| (f.key.as_str(), f.value.as_str()))
            .collect()
    }

    #[test]
    fn clean_value_strips_separator_noise() {
        assert_eq!(clean_value(" : 2024-01-01   "), "2024-01-01");
        assert_eq!(clean_value(" -- Ada   Lovelace - "), "Ada Lovelace");
        assert_eq!(clean_value(" : "), "");
    }

    #[test]
    fn spans_run_to_next_occurrence_or_end() {
        let text = "A : 1 B : 2";
        let resolved = vec![occurrence("A", 0, 1), occurrence("B", 6, 7)];
        let fields = partition(text, &resolved, &[key("A"), key("B")], DuplicatePolicy::LastWins);
        assert_eq!(values(&fields), vec![("A", "1"), ("B", "2")]);
    }

    #[test]
    fn missing_keys_are_empty() {
        let text = "A : 1";
        let resolved = vec![occurrence("A", 0, 1)];
        let fields = partition(text, &resolved, &[key("A"), key("C")], DuplicatePolicy::LastWins);
        assert_eq!(values(&fields), vec![("A", "1"), ("C", "")]);
    }

    #[test]
    fn duplicate_policies() {
        let text = "Total : 10 Total : 12";
        let resolved = vec![occurrence("Total", 0, 5), occurrence("Total", 11, 16)];
        let keys = [key("Total")];

        let last = partition(text, &resolved, &keys, DuplicatePolicy::LastWins);
        assert_eq!(last[0].value, "12");

        let first = partition(text, &resolved, &keys, DuplicatePolicy::FirstWins);
        assert_eq!(first[0].value, "10");

        let all = partition(text, &resolved, &keys, DuplicatePolicy::Collect);
        assert_eq!(all[0].value, "10; 12");
    }

    #[test]
    fn repeated_template_key_keeps_first_slot() {
        let fields = partition("", &[], &[key("A"), key("B"), key("A")], DuplicatePolicy::LastWins);
        assert_eq!(values(&fields), vec![("A", ""), ("B", "")]);
    }
}
