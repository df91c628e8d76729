// ABOUTME: Raw n-gram frequency counting used when TF-IDF cannot be fitted.
// ABOUTME: Stopwords are removed before n-grams are built; ties keep first-seen order.

use std::collections::HashMap;

use crate::tokenize::{is_stopword, ngrams, tokenize, NgramRange};
use crate::ScoredTerm;

/// Most common n-grams of a single text, counts reported as scores.
pub fn top_frequent(text: &str, range: NgramRange, top_k: usize) -> Vec<ScoredTerm> {
    let tokens: Vec<String> = tokenize(text)
        .into_iter()
        .filter(|t| !is_stopword(t))
        .collect();

    // term -> (count, first position)
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for (pos, gram) in ngrams(&tokens, range).into_iter().enumerate() {
        counts.entry(gram).or_insert((0, pos)).0 += 1;
    }

    let mut ranked: Vec<(String, usize, usize)> = counts
        .into_iter()
        .map(|(term, (count, first))| (term, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ranked
        .into_iter()
        .take(top_k)
        .map(|(term, count, _)| ScoredTerm::new(term, count as f64))
        .collect()
}
