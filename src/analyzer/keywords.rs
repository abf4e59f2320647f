//! Keyword density over body text

use crate::audit::KeywordDensity;
use std::collections::HashMap;

/// Number of ranked keywords kept
pub const MAX_KEYWORDS: usize = 10;

/// Tokens must be longer than this many characters to count
pub const MIN_TOKEN_CHARS: usize = 3;

/// Computes the density of the most frequent words in `text`
///
/// The text is lowercased and split on whitespace; only tokens longer than
/// three characters qualify. Words are ranked by count, ties going to the
/// word seen first. Each percentage is the share of all qualifying tokens,
/// rounded to two decimals.
///
/// # Example
///
/// ```
/// use seo_auditor::analyzer::keyword_density;
///
/// let density = keyword_density("Rust rust crab is the best crab");
/// assert_eq!(density.words(), vec!["rust", "crab", "best"]);
/// assert_eq!(density.get("rust"), Some(40.0));
/// ```
pub fn keyword_density(text: &str) -> KeywordDensity {
    let lowered = text.to_lowercase();

    // Counts in first-seen order; the index map points into `counts`
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut total = 0usize;

    for token in lowered
        .split_whitespace()
        .filter(|t| t.chars().count() > MIN_TOKEN_CHARS)
    {
        total += 1;
        match index.get(token).copied() {
            Some(i) => counts[i].1 += 1,
            None => {
                index.insert(token, counts.len());
                counts.push((token, 1));
            }
        }
    }

    if total == 0 {
        return KeywordDensity::new();
    }

    // Stable sort keeps first-seen order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let entries = counts
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|(word, count)| (word.to_string(), percentage(count, total)))
        .collect();

    KeywordDensity::from_entries(entries)
}

/// `count / total * 100`, rounded to two decimals
fn percentage(count: usize, total: usize) -> f64 {
    let raw = count as f64 / total as f64 * 100.0;
    (raw * 100.0).round() / 100.0
}
