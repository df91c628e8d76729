// ABOUTME: Corpus-level n-gram scoring: TF-IDF across all documents with a frequency fallback.
// ABOUTME: Always returns one row per input document, whichever method produced it.

use serde::Serialize;
use tracing::{debug, warn};

use crate::frequency::top_frequent;
use crate::tfidf::TfidfVectorizer;
use crate::tokenize::NgramRange;
use crate::ScoredTerm;

/// Which method produced a set of corpus scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMethod {
    TfIdf,
    Frequency,
}

/// Per-document top terms, in input order.
#[derive(Debug, Clone)]
pub struct CorpusScores {
    pub method: ScoringMethod,
    pub rows: Vec<Vec<ScoredTerm>>,
}

/// Scores each document's top n-grams relative to the whole corpus.
#[derive(Debug, Clone, Copy)]
pub struct CorpusScorer {
    range: NgramRange,
    top_k: usize,
    fallback_top_k: usize,
}

impl CorpusScorer {
    pub fn new(range: NgramRange, top_k: usize) -> Self {
        Self {
            range,
            top_k,
            fallback_top_k: top_k,
        }
    }

    /// Cap used when falling back to frequency counts.
    pub fn fallback_top_k(mut self, k: usize) -> Self {
        self.fallback_top_k = k;
        self
    }

    pub fn score<S: AsRef<str>>(&self, texts: &[S]) -> CorpusScores {
        match TfidfVectorizer::new(self.range).fit_transform(texts) {
            Ok(matrix) => {
                debug!(
                    documents = matrix.n_rows(),
                    vocabulary = matrix.vocabulary().len(),
                    "fitted tf-idf"
                );
                CorpusScores {
                    method: ScoringMethod::TfIdf,
                    rows: (0..texts.len())
                        .map(|i| matrix.top_terms(i, self.top_k))
                        .collect(),
                }
            }
            Err(err) => {
                warn!(error = %err, "tf-idf failed, falling back to frequency counts");
                CorpusScores {
                    method: ScoringMethod::Frequency,
                    rows: texts
                        .iter()
                        .map(|t| top_frequent(t.as_ref(), self.range, self.fallback_top_k))
                        .collect(),
                }
            }
        }
    }
}
