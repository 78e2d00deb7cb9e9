//! Fuzzy string scoring of candidate products

use rayon::prelude::*;

use crate::types::FuzzyMatch;

/// Candidate count above which scoring runs in parallel
const PARALLEL_SCORE_THRESHOLD: usize = 1000;

/// Normalized Indel similarity in `0.0..=100.0`
pub fn ratio(a: &str, b: &str) -> f64 {
    rapidfuzz::fuzz::ratio(a.chars(), b.chars()) * 100.0
}

/// Best `ratio` of the shorter string against any alignment in the longer.
///
/// Windows of the shorter string's length slide across the longer one;
/// alignments that hang off either end are compared against the partial
/// prefix or suffix. Both empty scores 100, one empty scores 0.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    match a.len().cmp(&b.len()) {
        std::cmp::Ordering::Less => aligned_ratio(&a, &b),
        std::cmp::Ordering::Greater => aligned_ratio(&b, &a),
        // Partial alignments differ by direction when lengths match
        std::cmp::Ordering::Equal => aligned_ratio(&a, &b).max(aligned_ratio(&b, &a)),
    }
}

fn aligned_ratio(short: &[char], long: &[char]) -> f64 {
    if short.is_empty() {
        return if long.is_empty() { 100.0 } else { 0.0 };
    }

    let n = short.len();
    let m = long.len();
    let score = |window: &[char]| {
        rapidfuzz::fuzz::ratio(short.iter().copied(), window.iter().copied()) * 100.0
    };

    let mut best: f64 = 0.0;

    // Alignments starting before the longer string
    for end in 1..n {
        best = best.max(score(&long[..end]));
    }
    // Full windows
    for start in 0..=(m - n) {
        best = best.max(score(&long[start..start + n]));
        if best >= 100.0 {
            return 100.0;
        }
    }
    // Alignments running past the end
    for start in (m - n + 1)..m {
        best = best.max(score(&long[start..]));
    }

    best
}

/// Score every `(product_id, combined_title)` candidate against `query`.
///
/// Keeps candidates scoring at least `threshold`, sorted by score descending.
/// Ties keep candidate order.
pub fn fuzzy_search<'a, I>(query: &str, products: I, threshold: f64) -> Vec<FuzzyMatch>
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    let query = query.to_lowercase();
    let candidates: Vec<(&String, &String)> = products.into_iter().collect();

    let score = |(id, title): &(&String, &String)| {
        let score = partial_ratio(&query, &title.to_lowercase());
        tracing::debug!(query = %query, product_id = %id, title = %title, score, "fuzzy score");
        FuzzyMatch {
            product_id: (*id).clone(),
            product_title: (*title).clone(),
            score,
        }
    };

    let mut results: Vec<FuzzyMatch> = if candidates.len() > PARALLEL_SCORE_THRESHOLD {
        candidates.par_iter().map(score).collect()
    } else {
        candidates.iter().map(score).collect()
    };

    results.retain(|m| m.score >= threshold);
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    results
}
