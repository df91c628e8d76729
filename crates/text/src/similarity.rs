// ABOUTME: Ratcliff/Obershelp sequence similarity over characters.
// ABOUTME: Used to pair broken URLs with their closest live counterparts.

use std::collections::HashMap;

/// Similarity in `[0, 1]`: twice the matched characters over the total length.
///
/// Matching blocks are found by taking the longest common substring and
/// recursing on the pieces to its left and right. Two empty strings are
/// identical.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_characters(&a, &b) as f64 / total as f64
}

fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, c) in b.iter().enumerate() {
        b2j.entry(*c).or_default().push(j);
    }

    let mut matched = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, k) = longest_match(a, &b2j, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        matched += k;
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            queue.push((i + k, ahi, j + k, bhi));
        }
    }
    matched
}

/// Longest block `a[i..i+k] == b[j..j+k]` inside the given windows.
/// Earliest start in `a` wins, then earliest in `b`.
fn longest_match(
    a: &[char],
    b2j: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_k) = (alo, blo, 0);
    // j -> length of the match ending at a[i - 1], b[j]
    let mut run: HashMap<usize, usize> = HashMap::new();
    for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut next = HashMap::new();
        if let Some(positions) = b2j.get(c) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let k = j.checked_sub(1).and_then(|p| run.get(&p)).copied().unwrap_or(0) + 1;
                next.insert(j, k);
                if k > best_k {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_k = k;
                }
            }
        }
        run = next;
    }
    (best_i, best_j, best_k)
}

/// The candidate most similar to `target`. The first of equally good
/// candidates wins; nothing is returned when no candidate shares a character.
pub fn best_match<'a, S: AsRef<str>>(target: &str, candidates: &'a [S]) -> Option<(&'a str, f64)> {
    let mut best: Option<(&'a str, f64)> = None;
    for candidate in candidates {
        let ratio = sequence_ratio(target, candidate.as_ref());
        if ratio > best.map(|(_, r)| r).unwrap_or(0.0) {
            best = Some((candidate.as_ref(), ratio));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_known_values() {
        assert_eq!(sequence_ratio("abcd", "bcde"), 0.75);
        assert_eq!(sequence_ratio("abc", "abc"), 1.0);
        assert_eq!(sequence_ratio("abc", "xyz"), 0.0);
        assert_eq!(sequence_ratio("", ""), 1.0);
        assert_eq!(sequence_ratio("abc", ""), 0.0);
    }

    #[test]
    fn test_ratio_recurses_on_both_sides() {
        // "qabxcd" vs "abycdf": blocks "ab" and "cd" -> 2 * 4 / 12
        let r = sequence_ratio("qabxcd", "abycdf");
        assert!((r - 8.0 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_best_match_picks_closest_url() {
        let live = vec![
            "https://example.com/blog/".to_string(),
            "https://example.com/shop/running-shoes".to_string(),
            "https://example.com/contact".to_string(),
        ];
        let (url, ratio) = best_match("https://example.com/shop/running-shoe", &live).unwrap();
        assert_eq!(url, "https://example.com/shop/running-shoes");
        assert!(ratio > 0.9);
    }

    #[test]
    fn test_best_match_none_without_overlap() {
        let live = ["xyz"];
        assert_eq!(best_match("abc", &live), None);
        let empty: [&str; 0] = [];
        assert_eq!(best_match("abc", &empty), None);
    }
}
