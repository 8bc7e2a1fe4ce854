use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults::{
    clamp_preview_rows, clamp_sample_size, clamp_word_cloud_terms, default_max_text_chars,
    default_preview_rows, default_sample_size, default_visible_labels, default_word_cloud_terms,
};
use crate::sentiment::Sentiment;
use crate::summary::SummaryOptions;

/// Dashboard settings persisted in `config.toml`.
///
/// Config keys (TOML): `default_dataset`, `sample_size`, `visible_labels`,
/// `preview_rows`, `word_cloud_terms`, `max_text_chars`, `lexicon_path`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// CSV analyzed when no dataset is given; the bundled sample otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_dataset: Option<PathBuf>,
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,
    /// Labels whose sample comments are shown.
    #[serde(default = "default_visible_labels")]
    pub visible_labels: Vec<Sentiment>,
    /// Rows shown in the upload preview.
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
    #[serde(default = "default_word_cloud_terms")]
    pub word_cloud_terms: usize,
    /// Longest text the scorer accepts, in characters.
    #[serde(default = "default_max_text_chars")]
    pub max_text_chars: usize,
    /// Lexicon overrides; `<app dir>/lexicon.toml` is used when unset and present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lexicon_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_dataset: None,
            sample_size: default_sample_size(),
            visible_labels: default_visible_labels(),
            preview_rows: default_preview_rows(),
            word_cloud_terms: default_word_cloud_terms(),
            max_text_chars: default_max_text_chars(),
            lexicon_path: None,
        }
    }
}

impl Settings {
    /// Clamp numeric limits and canonicalize the label filter.
    ///
    /// Labels keep display order without duplicates; an empty filter shows
    /// every label.
    pub fn normalized(self) -> Self {
        let visible_labels: Vec<Sentiment> = Sentiment::ALL
            .into_iter()
            .filter(|label| self.visible_labels.contains(label))
            .collect();
        Self {
            sample_size: clamp_sample_size(self.sample_size),
            visible_labels: if visible_labels.is_empty() {
                default_visible_labels()
            } else {
                visible_labels
            },
            preview_rows: clamp_preview_rows(self.preview_rows),
            word_cloud_terms: clamp_word_cloud_terms(self.word_cloud_terms),
            max_text_chars: self.max_text_chars.max(1),
            ..self
        }
    }

    pub fn summary_options(&self) -> SummaryOptions {
        SummaryOptions {
            sample_size: self.sample_size,
            visible_labels: self.visible_labels.clone(),
            word_cloud_terms: self.word_cloud_terms,
        }
    }
}
