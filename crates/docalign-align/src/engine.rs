//! Alignment engine: normalize, locate, resolve, partition.

use std::fmt;

use tracing::debug;

use docalign_model::{AlignOptions, AlignmentResult, Template, TemplateKey};

use crate::error::AlignError;
use crate::locate::{Locator, locate_fuzzy, merge_occurrences};
use crate::normalize::normalize;
use crate::partition::partition;
use crate::resolve::resolve;
use crate::score::{Similarity, scorer_for};

/// Reusable aligner for one document class.
///
/// Compiles the key pattern once; [`Aligner::align`] is then a pure function
/// of the OCR lines and can be called from several threads at once.
///
/// # Example
///
/// ```ignore
/// use docalign_align::Aligner;
/// use docalign_model::{AlignOptions, Template};
///
/// let template = Template::parse("Name\nDate")?;
/// let aligner = Aligner::from_template(&template, AlignOptions::default())?;
/// let result = aligner.align(&["Name: Ada", "Date: 1815-12-10"]);
/// assert_eq!(result.get("Date"), Some("1815-12-10"));
/// ```
pub struct Aligner {
    keys: Vec<TemplateKey>,
    locator: Locator,
    scorer: Box<dyn Similarity>,
    options: AlignOptions,
}

impl Aligner {
    pub fn new(keys: &[TemplateKey], options: AlignOptions) -> Result<Self, AlignError> {
        let locator = Locator::new(keys, options.match_priority)?;
        Ok(Self {
            keys: keys.to_vec(),
            locator,
            scorer: scorer_for(options.scorer),
            options,
        })
    }

    pub fn from_template(template: &Template, options: AlignOptions) -> Result<Self, AlignError> {
        Self::new(template.keys(), options)
    }

    pub fn keys(&self) -> &[TemplateKey] {
        &self.keys
    }

    pub fn options(&self) -> &AlignOptions {
        &self.options
    }

    /// Aligns the OCR lines of one document.
    ///
    /// The result always holds every distinct template key; labels that were
    /// not found map to the empty string.
    pub fn align<S: AsRef<str>>(&self, lines: &[S]) -> AlignmentResult {
        let text = normalize(lines);
        let exact = self.locator.locate(&text);
        let exact_count = exact.len();
        let occurrences = match self.options.fuzzy_locate {
            Some(threshold) => {
                let fuzzy =
                    locate_fuzzy(&text, &exact, &self.keys, self.scorer.as_ref(), threshold);
                merge_occurrences(exact, fuzzy)
            }
            None => exact,
        };
        let resolved = resolve(&occurrences, &self.keys, self.scorer.as_ref());
        let fields = partition(&text, &resolved, &self.keys, self.options.duplicates);
        let result = AlignmentResult::new(fields, resolved);
        debug!(
            line_count = lines.len(),
            text_len = text.len(),
            exact = exact_count,
            fuzzy = occurrences.len() - exact_count,
            filled = result.filled_count(),
            key_count = result.len(),
            scorer = self.scorer.name(),
            "aligned document"
        );
        result
    }
}

impl fmt::Debug for Aligner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aligner")
            .field("keys", &self.keys)
            .field("scorer", &self.scorer.name())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Aligns `lines` against `keys` with default options.
pub fn align<S: AsRef<str>>(
    lines: &[S],
    keys: &[TemplateKey],
) -> Result<AlignmentResult, AlignError> {
    Ok(Aligner::new(keys, AlignOptions::default())?.align(lines))
}
