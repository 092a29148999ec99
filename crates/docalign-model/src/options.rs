//! Configuration options for template alignment.

use serde::{Deserialize, Serialize};

/// Default score a fuzzy label candidate must reach (0-100).
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 75.0;

/// What to do when the same key is resolved more than once in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DuplicatePolicy {
    /// The value after the last occurrence is kept.
    #[default]
    LastWins,
    /// The value after the first occurrence is kept.
    FirstWins,
    /// Non-empty values are joined with `"; "` in document order.
    Collect,
}

/// String similarity used to assign occurrences to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScorerKind {
    /// Normalized Indel similarity over sorted tokens.
    #[default]
    TokenSort,
    /// Jaro-Winkler similarity over sorted tokens.
    JaroWinkler,
}

/// Order of alternatives in the label pattern.
///
/// Two keys can match at the same text position ("Date" and "Date of Birth");
/// the first alternative in pattern order wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchPriority {
    /// Template declaration order.
    #[default]
    DeclarationOrder,
    /// Longer keys first; equal lengths keep declaration order.
    LongestKey,
}

/// Options controlling alignment behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignOptions {
    pub duplicates: DuplicatePolicy,
    pub scorer: ScorerKind,
    pub match_priority: MatchPriority,
    /// Minimum score for separator-anchored fuzzy label candidates.
    ///
    /// `None` disables the fallback, leaving only exact pattern matches.
    pub fuzzy_locate: Option<f64>,
}

impl Default for AlignOptions {
    fn default() -> Self {
        Self {
            duplicates: DuplicatePolicy::LastWins,
            scorer: ScorerKind::TokenSort,
            match_priority: MatchPriority::DeclarationOrder,
            fuzzy_locate: Some(DEFAULT_FUZZY_THRESHOLD),
        }
    }
}

impl AlignOptions {
    /// Only labels matched by the flexible key pattern are used.
    pub fn strict() -> Self {
        Self {
            fuzzy_locate: None,
            ..Self::default()
        }
    }

    pub fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    pub fn with_scorer(mut self, scorer: ScorerKind) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn with_match_priority(mut self, priority: MatchPriority) -> Self {
        self.match_priority = priority;
        self
    }

    /// Threshold is clamped to `0..=100`.
    pub fn with_fuzzy_locate(mut self, threshold: Option<f64>) -> Self {
        self.fuzzy_locate = threshold.map(|t| t.clamp(0.0, 100.0));
        self
    }
}
