use crate::sentiment::{Sentiment, lexicon::DEFAULT_MAX_TEXT_CHARS};
use crate::summary::{DEFAULT_SAMPLE_SIZE, DEFAULT_WORD_CLOUD_TERMS};

pub(super) const MAX_SAMPLE_SIZE: usize = 50;
pub(super) const MAX_PREVIEW_ROWS: usize = 100;
pub(super) const MAX_WORD_CLOUD_TERMS: usize = 1_000;

pub(super) fn clamp_sample_size(value: usize) -> usize {
    value.clamp(1, MAX_SAMPLE_SIZE)
}

pub(super) fn clamp_preview_rows(value: usize) -> usize {
    value.clamp(1, MAX_PREVIEW_ROWS)
}

pub(super) fn clamp_word_cloud_terms(value: usize) -> usize {
    value.clamp(1, MAX_WORD_CLOUD_TERMS)
}

pub(super) fn default_sample_size() -> usize {
    DEFAULT_SAMPLE_SIZE
}

pub(super) fn default_visible_labels() -> Vec<Sentiment> {
    Sentiment::ALL.to_vec()
}

pub(super) fn default_preview_rows() -> usize {
    5
}

pub(super) fn default_word_cloud_terms() -> usize {
    DEFAULT_WORD_CLOUD_TERMS
}

pub(super) fn default_max_text_chars() -> usize {
    DEFAULT_MAX_TEXT_CHARS
}
