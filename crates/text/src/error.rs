// ABOUTME: Error types for text scoring operations.
// ABOUTME: Provides ScoreError with EmptyVocabulary and InvalidRange variants.

use thiserror::Error;

/// Errors that can occur while building n-gram scores.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    /// No document produced a single token, so there is nothing to weight.
    #[error("empty vocabulary: documents contain no tokens")]
    EmptyVocabulary,

    /// The n-gram range is not `1 <= min <= max`.
    #[error("invalid n-gram range ({min}, {max}): expected 1 <= min <= max")]
    InvalidRange { min: usize, max: usize },
}

impl ScoreError {
    /// Returns true if this is an EmptyVocabulary error.
    pub fn is_empty_vocabulary(&self) -> bool {
        matches!(self, ScoreError::EmptyVocabulary)
    }
}
