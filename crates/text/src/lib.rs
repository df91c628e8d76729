// ABOUTME: Text scoring library for seokit: tokenization, n-grams, TF-IDF and frequency fallback.
// ABOUTME: Also hosts the sequence-matching similarity used for redirect mapping.

pub mod error;
pub mod frequency;
pub mod scorer;
pub mod similarity;
pub mod tfidf;
pub mod tokenize;

pub use error::ScoreError;
pub use frequency::top_frequent;
pub use scorer::{CorpusScorer, CorpusScores, ScoringMethod};
pub use similarity::{best_match, sequence_ratio};
pub use tfidf::{TfidfMatrix, TfidfVectorizer};
pub use tokenize::{ngrams, tokenize, NgramRange};

use serde::{Deserialize, Serialize};

/// A term together with the weight it scored within one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTerm {
    pub term: String,
    pub score: f64,
}

impl ScoredTerm {
    pub fn new(term: impl Into<String>, score: f64) -> Self {
        Self {
            term: term.into(),
            score,
        }
    }
}
