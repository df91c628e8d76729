// ABOUTME: TF-IDF vectorizer over word n-grams with smoothed idf and L2-normalised rows.
// ABOUTME: Vocabulary is indexed in sorted term order; rows are stored sparsely.

use std::collections::{BTreeMap, HashMap};

use crate::error::ScoreError;
use crate::tokenize::{ngrams, tokenize, NgramRange};
use crate::ScoredTerm;

/// Fits TF-IDF weights across a corpus of documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct TfidfVectorizer {
    range: NgramRange,
}

/// Fitted TF-IDF weights: one sparse row per input document.
#[derive(Debug, Clone)]
pub struct TfidfMatrix {
    vocabulary: Vec<String>,
    rows: Vec<Vec<(usize, f64)>>,
}

impl TfidfVectorizer {
    pub fn new(range: NgramRange) -> Self {
        Self { range }
    }

    /// Learn the vocabulary and idf of `docs` and return their weight rows.
    ///
    /// idf(t) = ln((1 + n) / (1 + df(t))) + 1, tf is the raw count, and
    /// every non-empty row is scaled to unit L2 norm.
    pub fn fit_transform<S: AsRef<str>>(&self, docs: &[S]) -> Result<TfidfMatrix, ScoreError> {
        let counts: Vec<HashMap<String, usize>> = docs
            .iter()
            .map(|doc| {
                let mut tf = HashMap::new();
                for gram in ngrams(&tokenize(doc.as_ref()), self.range) {
                    *tf.entry(gram).or_insert(0) += 1;
                }
                tf
            })
            .collect();

        let mut df: BTreeMap<&str, usize> = BTreeMap::new();
        for tf in &counts {
            for term in tf.keys() {
                *df.entry(term.as_str()).or_insert(0) += 1;
            }
        }
        if df.is_empty() {
            return Err(ScoreError::EmptyVocabulary);
        }

        let n_docs = docs.len() as f64;
        let vocabulary: Vec<String> = df.keys().map(|t| t.to_string()).collect();
        let index: HashMap<&str, (usize, f64)> = df
            .iter()
            .enumerate()
            .map(|(i, (term, &freq))| {
                let idf = ((1.0 + n_docs) / (1.0 + freq as f64)).ln() + 1.0;
                (*term, (i, idf))
            })
            .collect();

        let rows = counts
            .iter()
            .map(|tf| {
                let mut row: Vec<(usize, f64)> = tf
                    .iter()
                    .map(|(term, &count)| {
                        let (i, idf) = index[term.as_str()];
                        (i, count as f64 * idf)
                    })
                    .collect();
                let norm = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
                if norm > 0.0 {
                    for (_, w) in row.iter_mut() {
                        *w /= norm;
                    }
                }
                row.sort_by_key(|(i, _)| *i);
                row
            })
            .collect();

        Ok(TfidfMatrix { vocabulary, rows })
    }
}

impl TfidfMatrix {
    /// Number of documents.
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// All terms in index order.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Weight of `term` in document `row`, zero when absent.
    pub fn weight(&self, row: usize, term: &str) -> f64 {
        let Ok(idx) = self.vocabulary.binary_search_by(|t| t.as_str().cmp(term)) else {
            return 0.0;
        };
        self.rows
            .get(row)
            .and_then(|r| r.iter().find(|(i, _)| *i == idx))
            .map(|(_, w)| *w)
            .unwrap_or(0.0)
    }

    /// Up to `k` positive-weight terms of document `row`, heaviest first.
    /// Equal weights keep vocabulary order.
    pub fn top_terms(&self, row: usize, k: usize) -> Vec<ScoredTerm> {
        let Some(entries) = self.rows.get(row) else {
            return Vec::new();
        };
        let mut ranked: Vec<&(usize, f64)> = entries.iter().filter(|(_, w)| *w > 0.0).collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked
            .into_iter()
            .take(k)
            .map(|&(i, w)| ScoredTerm::new(self.vocabulary[i].clone(), w))
            .collect()
    }
}
