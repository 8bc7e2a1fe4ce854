use serde::Serialize;

use crate::dataset::ClassifiedDataset;
use crate::sentiment::Sentiment;

/// Row count per label. Every label is present, zero included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LabelCounts {
    #[serde(rename = "Positive")]
    positive: usize,
    #[serde(rename = "Neutral")]
    neutral: usize,
    #[serde(rename = "Negative")]
    negative: usize,
}

impl LabelCounts {
    pub fn get(&self, label: Sentiment) -> usize {
        match label {
            Sentiment::Positive => self.positive,
            Sentiment::Neutral => self.neutral,
            Sentiment::Negative => self.negative,
        }
    }

    fn slot(&mut self, label: Sentiment) -> &mut usize {
        match label {
            Sentiment::Positive => &mut self.positive,
            Sentiment::Neutral => &mut self.neutral,
            Sentiment::Negative => &mut self.negative,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }

    /// `(label, count)` in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Sentiment, usize)> + '_ {
        Sentiment::ALL.into_iter().map(|label| (label, self.get(label)))
    }

    /// Percentage of the total per label; all zero when there are no rows.
    pub fn shares(&self) -> [(Sentiment, f64); 3] {
        let total = self.total();
        Sentiment::ALL.map(|label| {
            let share = if total == 0 {
                0.0
            } else {
                self.get(label) as f64 * 100.0 / total as f64
            };
            (label, share)
        })
    }
}

impl FromIterator<Sentiment> for LabelCounts {
    fn from_iter<I: IntoIterator<Item = Sentiment>>(iter: I) -> Self {
        let mut counts = LabelCounts::default();
        for label in iter {
            *counts.slot(label) += 1;
        }
        counts
    }
}

/// Count rows per label across the whole dataset.
pub fn counts(dataset: &ClassifiedDataset) -> LabelCounts {
    dataset.labels().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_labels_are_reported() {
        let counts: LabelCounts = [Sentiment::Positive, Sentiment::Positive].into_iter().collect();
        assert_eq!(counts.get(Sentiment::Positive), 2);
        assert_eq!(counts.get(Sentiment::Neutral), 0);
        assert_eq!(counts.get(Sentiment::Negative), 0);
        assert_eq!(counts.iter().count(), 3);
    }

    #[test]
    fn shares_sum_to_hundred() {
        let counts: LabelCounts = [
            Sentiment::Positive,
            Sentiment::Negative,
            Sentiment::Neutral,
            Sentiment::Neutral,
        ]
        .into_iter()
        .collect();
        let total: f64 = counts.shares().iter().map(|(_, share)| share).sum();
        assert!((total - 100.0).abs() < 1e-9);
        assert_eq!(counts.shares()[1], (Sentiment::Neutral, 50.0));
    }

    #[test]
    fn empty_shares_are_zero() {
        let counts = LabelCounts::default();
        assert!(counts.shares().iter().all(|(_, share)| *share == 0.0));
    }

    #[test]
    fn serializes_with_label_names() {
        let counts: LabelCounts = [Sentiment::Negative].into_iter().collect();
        let json = serde_json::to_value(counts).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"Positive": 0, "Neutral": 0, "Negative": 1})
        );
    }
}
