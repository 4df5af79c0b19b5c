//! Column mapping for the import pipeline.
//!
//! - [`similarity_score`]: word-level Levenshtein similarity in `[0, 1]`
//! - [`SuggestionEngine`]: initial mappings from hints and similarity
//! - [`MappingTable`]: the current mapping, kept one-to-one as it is edited

#![deny(unsafe_code)]

pub mod engine;
pub mod error;
pub mod score;
pub mod state;

pub use engine::{
    MatchSource, SUGGESTION_THRESHOLD, Suggestion, SuggestionEngine, suggest_mappings,
};
pub use error::MappingError;
pub use score::{similarity_score, word_similarity};
pub use state::{MappingSummary, MappingTable, verify_required};
