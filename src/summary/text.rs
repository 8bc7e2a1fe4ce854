//! Text blobs and term weights that feed word-cloud rendering.

use std::collections::{BTreeMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::dataset::{ClassifiedDataset, Row};
use crate::sentiment::Sentiment;

/// Terms kept per cloud unless configured otherwise.
pub const DEFAULT_WORD_CLOUD_TERMS: usize = 200;

const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "else",
    "ever", "few", "for", "from", "further", "get", "had", "has", "have", "having", "he", "her",
    "here", "hers", "herself", "him", "himself", "his", "how", "however", "i", "if", "in", "into",
    "is", "it", "its", "itself", "just", "let", "me", "more", "most", "my", "myself", "of", "off",
    "on", "once", "only", "or", "other", "otherwise", "ought", "our", "ours", "ourselves", "out",
    "over", "own", "same", "shall", "she", "should", "since", "so", "some", "such", "than",
    "that", "the", "their", "theirs", "them", "themselves", "then", "there", "these", "they",
    "this", "those", "through", "to", "too", "under", "until", "up", "very", "was", "we", "were",
    "what", "when", "where", "which", "while", "who", "whom", "why", "will", "with", "would",
    "you", "your", "yours", "yourself", "yourselves",
];

/// One word-cloud term with its frequency relative to the top term.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordWeight {
    pub word: String,
    pub count: usize,
    /// `count / top_count`, in `(0, 1]`.
    pub weight: f64,
}

/// Texts of the rows carrying `label`, joined by single spaces in dataset order.
pub fn combined_text(dataset: &ClassifiedDataset, label: Sentiment) -> String {
    dataset
        .rows_with(label)
        .map(Row::text)
        .collect::<Vec<_>>()
        .join(" ")
}

fn term_regex() -> &'static Regex {
    static TERMS: OnceLock<Regex> = OnceLock::new();
    TERMS.get_or_init(|| Regex::new(r"\w[\w']+").expect("term regex must compile"))
}

fn stopwords() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| STOPWORDS.iter().copied().collect())
}

/// Most frequent terms of `text`, heaviest first, at most `limit` of them.
///
/// Terms are lowercased, trailing `'s` is dropped, and stopwords plus pure
/// numbers are skipped. Ties are broken alphabetically.
pub fn word_weights(text: &str, limit: usize) -> Vec<WordWeight> {
    let lowered = text.to_lowercase();
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for found in term_regex().find_iter(&lowered) {
        let term = found.as_str();
        let term = term.strip_suffix("'s").unwrap_or(term).trim_end_matches('\'');
        if term.chars().count() < 2
            || stopwords().contains(term)
            || term.chars().all(|c| c.is_ascii_digit())
        {
            continue;
        }
        *counts.entry(term).or_default() += 1;
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(limit);

    let top = ranked.first().map(|(_, count)| *count).unwrap_or(0);
    ranked
        .into_iter()
        .map(|(word, count)| WordWeight {
            word: word.to_string(),
            count,
            weight: count as f64 / top as f64,
        })
        .collect()
}
