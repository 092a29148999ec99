//! Canonicalization of the OCR text stream.

use std::sync::LazyLock;

use regex::Regex;

/// Canonical form of a key/value separator in normalized text.
pub const SEPARATOR_TOKEN: &str = " : ";

static SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*:\s*").expect("separator pattern is valid"));

/// Joins OCR lines with a single space and canonicalizes colon separators.
///
/// Every run of optional whitespace around a colon becomes `" : "`, so
/// `"Name:"`, `"Name :"` and `"Name  :  "` all compare equal afterwards.
/// The transformation is idempotent.
pub fn normalize<S: AsRef<str>>(lines: &[S]) -> String {
    let joined = lines
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ");
    normalize_text(&joined)
}

/// Canonicalizes colon separators in a single string.
pub fn normalize_text(text: &str) -> String {
    SEPARATOR.replace_all(text, SEPARATOR_TOKEN).into_owned()
}

/// Byte ranges of every canonical separator in normalized text.
pub fn separators(normalized: &str) -> impl Iterator<Item = (usize, usize)> + '_ {
    normalized
        .match_indices(SEPARATOR_TOKEN)
        .map(|(start, token)| (start, start + token.len()))
}
