use rand::Rng;
use rand::seq::IteratorRandom;

use crate::dataset::{ClassifiedDataset, Row};
use crate::sentiment::Sentiment;

/// Rows shown per label unless configured otherwise.
pub const DEFAULT_SAMPLE_SIZE: usize = 3;

/// Draw up to `k` rows carrying `label`, uniformly and without replacement.
///
/// Returns exactly `min(k, count(label))` rows. Order is unspecified.
pub fn sample<'a, R: Rng + ?Sized>(
    dataset: &'a ClassifiedDataset,
    label: Sentiment,
    k: usize,
    rng: &mut R,
) -> Vec<&'a Row> {
    dataset.rows_with(label).choose_multiple(rng, k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::SourceKey;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn dataset(labels: &[Sentiment]) -> ClassifiedDataset {
        let rows = labels
            .iter()
            .enumerate()
            .map(|(idx, label)| Row::new(format!("{label} #{idx}")).labeled(*label))
            .collect();
        ClassifiedDataset::from_labeled(SourceKey::from_bytes("t", b"t"), rows)
    }

    #[test]
    fn sample_size_is_min_of_k_and_matches() {
        let data = dataset(&[
            Sentiment::Positive,
            Sentiment::Positive,
            Sentiment::Negative,
            Sentiment::Positive,
            Sentiment::Positive,
            Sentiment::Positive,
        ]);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let positives = sample(&data, Sentiment::Positive, 3, &mut rng);
            assert_eq!(positives.len(), 3);
            assert!(positives.iter().all(|row| row.has_label(Sentiment::Positive)));

            let mut unique: Vec<&str> = positives.iter().map(|row| row.text()).collect();
            unique.sort_unstable();
            unique.dedup();
            assert_eq!(unique.len(), 3);

            let negatives = sample(&data, Sentiment::Negative, 3, &mut rng);
            assert_eq!(negatives.len(), 1);
            assert!(sample(&data, Sentiment::Neutral, 3, &mut rng).is_empty());
        }
    }

    #[test]
    fn zero_k_yields_nothing() {
        let data = dataset(&[Sentiment::Neutral]);
        let mut rng = StdRng::seed_from_u64(7);
        assert!(sample(&data, Sentiment::Neutral, 0, &mut rng).is_empty());
    }
}
