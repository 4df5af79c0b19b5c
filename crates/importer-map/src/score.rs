//! Word-level string similarity.
//!
//! Both strings are lower-cased and split on spaces. Every word of one is
//! compared against every word of the other with a normalized Levenshtein
//! similarity, and the best pair wins. This favours headers that share a
//! single strong word ("Email" vs "email address") over whole-string
//! distance.

use rapidfuzz::distance::levenshtein;

/// Normalized Levenshtein similarity of two words.
///
/// `(max_len - distance) / max_len` over chars; two empty words score `1.0`.
pub fn word_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    let distance = levenshtein::distance(a.chars(), b.chars());
    (max_len - distance) as f64 / max_len as f64
}

/// Similarity of two strings in `[0, 1]`, ignoring case.
///
/// Returns the best [`word_similarity`] over all word pairs. Two strings
/// without words score `1.0`; if only one side has words the score is `0.0`.
pub fn similarity_score(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let a_words: Vec<&str> = a.split(' ').filter(|w| !w.is_empty()).collect();
    let b_words: Vec<&str> = b.split(' ').filter(|w| !w.is_empty()).collect();

    match (a_words.is_empty(), b_words.is_empty()) {
        (true, true) => 1.0,
        (true, false) | (false, true) => 0.0,
        (false, false) => a_words
            .iter()
            .flat_map(|a_word| b_words.iter().map(|b_word| word_similarity(a_word, b_word)))
            .fold(0.0, f64::max),
    }
}
