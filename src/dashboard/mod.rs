//! Event-driven dashboard core.
//!
//! Each user interaction maps to one handler that returns a result object:
//! loading a dataset yields a [`DatasetView`], submitting a sentence yields a
//! [`SentenceVerdict`], and uploading a file yields an [`UploadOutcome`].
//! Rendering is left to a [`DisplaySurface`].

use std::io;
use std::sync::Arc;

use rand::Rng;
use serde::Serialize;
use thiserror::Error;

use crate::config::Settings;
use crate::dataset::{
    ClassifiedDataset, DatasetCache, DatasetError, DatasetSource, SourceKey, parse_csv,
};
use crate::sentiment::{ClassifyError, Classifier, PolarityScorer, ScoreError, Sentiment};
use crate::summary::{CategorySummary, LabelCounts, counts, summarize};

mod json;
mod surface;
mod terminal;

pub use json::JsonSurface;
pub use surface::DisplaySurface;
pub use terminal::TerminalSurface;

/// User-facing message for an upload without a `text` column.
pub const MISSING_TEXT_COLUMN_MESSAGE: &str = "CSV must have a column named 'text'.";

/// Errors surfaced while loading a dataset for display.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Classify(#[from] ClassifyError),
}

/// Interactions the dashboard reacts to.
#[derive(Debug, Clone)]
pub enum DashboardEvent {
    LoadDataset(DatasetSource),
    SubmitSentence(String),
    UploadFile { name: String, bytes: Vec<u8> },
}

/// Summary of a loaded dataset, ready for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetView {
    pub source: SourceKey,
    /// True when the classification came from the session cache.
    pub cached: bool,
    pub summary: CategorySummary,
}

/// Verdict for one sentence typed into the live checker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentenceVerdict {
    pub text: String,
    pub polarity: f64,
    pub label: Sentiment,
    /// Emoji shortcode matching the label.
    pub indicator: &'static str,
}

/// One labeled row of an upload preview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewRow {
    pub text: String,
    pub sentiment: Sentiment,
}

/// Result of processing an uploaded file.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UploadOutcome {
    Processed {
        name: String,
        source: SourceKey,
        rows: usize,
        counts: LabelCounts,
        preview: Vec<PreviewRow>,
    },
    Rejected {
        name: String,
        message: String,
    },
}

impl UploadOutcome {
    pub fn is_processed(&self) -> bool {
        matches!(self, UploadOutcome::Processed { .. })
    }
}

/// One dashboard session: a scorer, its settings and a private dataset cache.
pub struct Dashboard<S> {
    classifier: Classifier<S>,
    settings: Settings,
    cache: DatasetCache,
}

impl<S: PolarityScorer> Dashboard<S> {
    pub fn new(scorer: S, settings: Settings) -> Self {
        Self {
            classifier: Classifier::new(scorer),
            settings,
            cache: DatasetCache::default(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn cache(&self) -> &DatasetCache {
        &self.cache
    }

    /// Load, classify and summarize a dataset, sampling with the thread RNG.
    pub fn on_dataset_load(
        &mut self,
        source: &DatasetSource,
    ) -> Result<DatasetView, DashboardError> {
        self.on_dataset_load_with_rng(source, &mut rand::rng())
    }

    pub fn on_dataset_load_with_rng<R: Rng + ?Sized>(
        &mut self,
        source: &DatasetSource,
        rng: &mut R,
    ) -> Result<DatasetView, DashboardError> {
        let (dataset, cached) = self.classified(source)?;
        let summary = summarize(&dataset, &self.settings.summary_options(), rng);
        tracing::info!(
            "Dataset {}: {} row(s), {} positive / {} neutral / {} negative",
            dataset.key(),
            summary.total,
            summary.counts.get(Sentiment::Positive),
            summary.counts.get(Sentiment::Neutral),
            summary.counts.get(Sentiment::Negative),
        );
        Ok(DatasetView {
            source: dataset.key().clone(),
            cached,
            summary,
        })
    }

    /// Classify one sentence. Blank input produces no verdict.
    pub fn on_sentence_submit(&self, text: &str) -> Result<Option<SentenceVerdict>, ScoreError> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        let assessment = self.classifier.assess(text)?;
        Ok(Some(SentenceVerdict {
            text: text.to_string(),
            polarity: assessment.polarity,
            label: assessment.label,
            indicator: assessment.label.indicator(),
        }))
    }

    /// Validate and classify an uploaded CSV. Failures become a rejected
    /// outcome and leave every other dataset untouched.
    pub fn on_file_upload(&mut self, name: &str, bytes: &[u8]) -> UploadOutcome {
        let source = DatasetSource::Bytes {
            name: name.to_string(),
            bytes: bytes.to_vec(),
        };
        match self.classified(&source) {
            Ok((dataset, _)) => {
                tracing::info!("Upload {} processed: {} row(s)", dataset.key(), dataset.len());
                UploadOutcome::Processed {
                    name: name.to_string(),
                    source: dataset.key().clone(),
                    rows: dataset.len(),
                    counts: counts(&dataset),
                    preview: dataset
                        .rows()
                        .iter()
                        .take(self.settings.preview_rows)
                        .filter_map(|row| {
                            row.sentiment().map(|sentiment| PreviewRow {
                                text: row.text().to_string(),
                                sentiment,
                            })
                        })
                        .collect(),
                }
            }
            Err(err) => {
                tracing::warn!("Upload {name} rejected: {err}");
                let message = match err {
                    DashboardError::Dataset(DatasetError::MissingTextColumn { .. }) => {
                        MISSING_TEXT_COLUMN_MESSAGE.to_string()
                    }
                    other => other.to_string(),
                };
                UploadOutcome::Rejected {
                    name: name.to_string(),
                    message,
                }
            }
        }
    }

    /// Run the handler for `event` and hand its result to `surface`.
    ///
    /// Handler failures are shown as errors on the surface; only rendering
    /// failures are returned.
    pub fn handle(
        &mut self,
        event: DashboardEvent,
        surface: &mut dyn DisplaySurface,
    ) -> io::Result<()> {
        match event {
            DashboardEvent::LoadDataset(source) => match self.on_dataset_load(&source) {
                Ok(view) => surface.show_dataset(&view),
                Err(err) => {
                    tracing::error!("Dataset load failed: {err}");
                    surface.show_error(&err.to_string())
                }
            },
            DashboardEvent::SubmitSentence(text) => match self.on_sentence_submit(&text) {
                Ok(Some(verdict)) => surface.show_verdict(&verdict),
                Ok(None) => Ok(()),
                Err(err) => surface.show_error(&err.to_string()),
            },
            DashboardEvent::UploadFile { name, bytes } => {
                let outcome = self.on_file_upload(&name, &bytes);
                surface.show_upload(&outcome)
            }
        }
    }

    fn classified(
        &mut self,
        source: &DatasetSource,
    ) -> Result<(Arc<ClassifiedDataset>, bool), DashboardError> {
        let (name, bytes) = source.read()?;
        let key = SourceKey::from_bytes(&name, &bytes);
        if let Some(hit) = self.cache.get(&key) {
            tracing::info!("Reusing cached classification for {key}");
            return Ok((hit, true));
        }
        let dataset = parse_csv(&name, &bytes)?;
        let classified = self.classifier.classify_dataset(dataset)?;
        Ok((self.cache.insert(classified), false))
    }
}

#[cfg(test)]
mod tests;
