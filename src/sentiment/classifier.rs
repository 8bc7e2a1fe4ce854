use serde::Serialize;
use thiserror::Error;

use super::label::Sentiment;
use super::scorer::{PolarityScorer, ScoreError, checked_polarity};
use crate::dataset::{ClassifiedDataset, Dataset};

/// A row of a dataset could not be scored.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Failed to score row {row}: {source}")]
pub struct ClassifyError {
    /// 1-based row number within the dataset.
    pub row: usize,
    pub source: ScoreError,
}

/// Polarity together with the label it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Assessment {
    pub polarity: f64,
    pub label: Sentiment,
}

/// Labels text by thresholding the polarity reported by a scorer.
#[derive(Debug, Clone, Default)]
pub struct Classifier<S> {
    scorer: S,
}

impl<S: PolarityScorer> Classifier<S> {
    pub fn new(scorer: S) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    /// Score `text` and label it. Scores outside `[-1.0, 1.0]` are clamped and
    /// non-finite scores are rejected, whichever scorer produced them.
    pub fn assess(&self, text: &str) -> Result<Assessment, ScoreError> {
        let polarity = checked_polarity(self.scorer.score(text)?)?;
        Ok(Assessment {
            polarity,
            label: Sentiment::from_polarity(polarity),
        })
    }

    pub fn classify(&self, text: &str) -> Result<Sentiment, ScoreError> {
        self.assess(text).map(|assessment| assessment.label)
    }

    /// Label every row, in order. The first scoring failure aborts the whole
    /// dataset; nothing partially labeled escapes.
    pub fn classify_dataset(&self, dataset: Dataset) -> Result<ClassifiedDataset, ClassifyError> {
        let (key, rows) = dataset.into_parts();
        let labeled = rows
            .into_iter()
            .enumerate()
            .map(|(idx, row)| {
                self.classify(row.text())
                    .map(|label| row.labeled(label))
                    .map_err(|source| ClassifyError {
                        row: idx + 1,
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!("Classified {} row(s) from {key}", labeled.len());
        Ok(ClassifiedDataset::from_labeled(key, labeled))
    }
}
