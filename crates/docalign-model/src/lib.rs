pub mod error;
pub mod occurrence;
pub mod options;
pub mod result;
pub mod template;

pub use error::{ModelError, Result};
pub use occurrence::{MatchOrigin, Occurrence, ResolvedOccurrence};
pub use options::{
    AlignOptions, DEFAULT_FUZZY_THRESHOLD, DuplicatePolicy, MatchPriority, ScorerKind,
};
pub use result::{AlignedField, AlignmentResult};
pub use template::{Template, TemplateKey};
