// ABOUTME: Tokenizer and n-gram generation shared by the TF-IDF and frequency scorers.
// ABOUTME: Tokens are lowercase runs of at least two ASCII letters, digits or apostrophes.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ScoreError;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-zA-Z0-9']{2,}").unwrap());

/// Words dropped by the frequency fallback. TF-IDF keeps them.
pub const STOPWORDS: &[&str] = &[
    "a", "an", "the", "of", "in", "on", "for", "to", "with", "by", "from", "is", "are", "as",
    "that", "this", "it", "be", "or", "at", "which", "and",
];

/// Inclusive range of n-gram sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NgramRange {
    min: usize,
    max: usize,
}

impl NgramRange {
    /// Unigrams and bigrams.
    pub const UP_TO_BIGRAMS: NgramRange = NgramRange { min: 1, max: 2 };

    /// Create a range, rejecting anything outside `1 <= min <= max`.
    pub fn new(min: usize, max: usize) -> Result<Self, ScoreError> {
        if min == 0 || min > max {
            return Err(ScoreError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }
}

impl Default for NgramRange {
    fn default() -> Self {
        Self { min: 1, max: 3 }
    }
}

/// Lowercase `text` and split it into tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Returns true if `token` is in the fallback stopword list.
pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

/// Space-joined n-grams for every size in `range`, smallest size first.
pub fn ngrams(tokens: &[String], range: NgramRange) -> Vec<String> {
    let mut out = Vec::new();
    for n in range.min..=range.max {
        if n > tokens.len() {
            break;
        }
        out.extend(tokens.windows(n).map(|w| w.join(" ")));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tokenize_lowercases_and_drops_short_tokens() {
        assert_eq!(
            tokenize("Best Running-Shoes of 2024, a I x don't"),
            vec!["best", "running", "shoes", "of", "2024", "don't"]
        );
    }

    #[test]
    fn test_tokenize_ignores_non_ascii_letters() {
        assert_eq!(tokenize("café ñandú ok"), vec!["caf", "and", "ok"]);
    }

    #[test]
    fn test_ngrams_by_size() {
        let tokens = tokenize("red running shoes");
        let range = NgramRange::new(1, 3).unwrap();
        assert_eq!(
            ngrams(&tokens, range),
            vec![
                "red",
                "running",
                "shoes",
                "red running",
                "running shoes",
                "red running shoes"
            ]
        );
    }

    #[test]
    fn test_ngrams_longer_than_text() {
        let tokens = tokenize("shoes");
        let range = NgramRange::new(2, 3).unwrap();
        assert!(ngrams(&tokens, range).is_empty());
    }

    #[test]
    fn test_invalid_range() {
        assert_eq!(
            NgramRange::new(0, 2),
            Err(ScoreError::InvalidRange { min: 0, max: 2 })
        );
        assert!(NgramRange::new(3, 2).is_err());
        assert!(NgramRange::new(2, 2).is_ok());
    }

    #[test]
    fn test_stopwords() {
        assert!(is_stopword("the"));
        assert!(!is_stopword("shoes"));
    }
}
