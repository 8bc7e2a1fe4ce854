//! Per-label aggregation over a classified dataset.
//!
//! Everything here is derived on demand; nothing is stored alongside the
//! dataset.

use rand::Rng;
use serde::Serialize;

use crate::dataset::ClassifiedDataset;
use crate::sentiment::Sentiment;

mod counts;
mod sample;
mod text;

pub use counts::{LabelCounts, counts};
pub use sample::{DEFAULT_SAMPLE_SIZE, sample};
pub use text::{DEFAULT_WORD_CLOUD_TERMS, WordWeight, combined_text, word_weights};

/// Knobs for [`summarize`].
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryOptions {
    pub sample_size: usize,
    /// Labels whose samples are drawn; the others get an empty sample list.
    pub visible_labels: Vec<Sentiment>,
    pub word_cloud_terms: usize,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            visible_labels: Sentiment::ALL.to_vec(),
            word_cloud_terms: DEFAULT_WORD_CLOUD_TERMS,
        }
    }
}

/// Derived view of one label.
#[derive(Debug, Clone, Serialize)]
pub struct LabelSummary {
    pub label: Sentiment,
    pub count: usize,
    /// Percentage of all rows.
    pub share: f64,
    /// Whether the label passed the visibility filter.
    pub visible: bool,
    pub samples: Vec<String>,
    pub combined_text: String,
    pub word_cloud: Vec<WordWeight>,
}

/// Derived view of the whole dataset, one entry per label in display order.
#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub total: usize,
    pub counts: LabelCounts,
    pub labels: Vec<LabelSummary>,
}

impl CategorySummary {
    pub fn label(&self, label: Sentiment) -> &LabelSummary {
        &self.labels[label.index()]
    }
}

pub fn summarize<R: Rng + ?Sized>(
    dataset: &ClassifiedDataset,
    options: &SummaryOptions,
    rng: &mut R,
) -> CategorySummary {
    let counts = counts(dataset);
    let shares = counts.shares();
    let labels = Sentiment::ALL
        .into_iter()
        .zip(shares)
        .map(|(label, (_, share))| {
            let visible = options.visible_labels.contains(&label);
            let samples = if visible {
                sample(dataset, label, options.sample_size, &mut *rng)
                    .into_iter()
                    .map(|row| row.text().to_string())
                    .collect()
            } else {
                Vec::new()
            };
            let combined_text = combined_text(dataset, label);
            let word_cloud = word_weights(&combined_text, options.word_cloud_terms);
            LabelSummary {
                label,
                count: counts.get(label),
                share,
                visible,
                samples,
                combined_text,
                word_cloud,
            }
        })
        .collect();

    CategorySummary {
        total: dataset.len(),
        counts,
        labels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Row, SourceKey};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn dataset() -> ClassifiedDataset {
        let rows = [
            ("tasty soup", Sentiment::Positive),
            ("tasty bread", Sentiment::Positive),
            ("cold soup", Sentiment::Negative),
        ]
        .into_iter()
        .map(|(text, label)| Row::new(text).labeled(label))
        .collect();
        ClassifiedDataset::from_labeled(SourceKey::from_bytes("t", b"t"), rows)
    }

    #[test]
    fn summary_covers_every_label() {
        let mut rng = StdRng::seed_from_u64(1);
        let summary = summarize(&dataset(), &SummaryOptions::default(), &mut rng);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.labels.len(), 3);
        assert_eq!(summary.counts.total(), summary.total);

        let neutral = summary.label(Sentiment::Neutral);
        assert_eq!(neutral.count, 0);
        assert!(neutral.samples.is_empty());
        assert!(neutral.combined_text.is_empty());
        assert!(neutral.word_cloud.is_empty());

        let positive = summary.label(Sentiment::Positive);
        assert_eq!(positive.samples.len(), 2);
        assert_eq!(positive.combined_text, "tasty soup tasty bread");
        assert_eq!(positive.word_cloud[0].word, "tasty");
    }

    #[test]
    fn hidden_labels_skip_samples_but_keep_counts() {
        let options = SummaryOptions {
            visible_labels: vec![Sentiment::Negative],
            ..SummaryOptions::default()
        };
        let mut rng = StdRng::seed_from_u64(2);
        let summary = summarize(&dataset(), &options, &mut rng);
        let positive = summary.label(Sentiment::Positive);
        assert!(!positive.visible);
        assert!(positive.samples.is_empty());
        assert_eq!(positive.count, 2);
        assert_eq!(summary.label(Sentiment::Negative).samples, vec!["cold soup"]);
    }
}
