#![deny(unsafe_code)]

//! Reconstructs key/value fields from noisy OCR lines and a fixed template.
//!
//! The pipeline runs strictly in one direction:
//! [`normalize`] → [`Locator::locate`] (plus [`locate_fuzzy`]) →
//! [`resolve`] → [`partition`]. [`Aligner`] composes the stages.

pub mod engine;
pub mod error;
pub mod locate;
pub mod normalize;
pub mod partition;
pub mod resolve;
pub mod score;

pub use engine::{Aligner, align};
pub use error::AlignError;
pub use locate::{Locator, locate, locate_fuzzy, merge_occurrences};
pub use normalize::{SEPARATOR_TOKEN, normalize, normalize_text};
pub use partition::{clean_value, partition};
pub use resolve::resolve;
pub use score::{
    JaroWinklerRatio, Similarity, TokenSortRatio, best_match, literal_similarity, scorer_for,
};
