//! Text datasets: loading, validation and classified snapshots.
//!
//! A [`Dataset`] is what a source yields before any scoring; a
//! [`ClassifiedDataset`] can only be produced by the classifier and carries a
//! label on every row. Classified datasets are immutable and shared through
//! `Arc`, so independent sessions never observe each other's mutations.

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::sentiment::Sentiment;

mod cache;
mod loader;

pub use cache::{DEFAULT_CACHE_CAPACITY, DatasetCache};
pub use loader::{TEXT_COLUMN, parse_csv, text_column_index};

/// Sample dataset compiled into the binary.
pub const BUNDLED_DATASET: &[u8] = include_bytes!("../../assets/sentiment_dataset.csv");
/// Display name of the bundled dataset.
pub const BUNDLED_DATASET_NAME: &str = "sentiment_dataset.csv";

/// Errors raised while reading or validating a tabular text source.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Failed to read the source file.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The delimited file could not be parsed.
    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    /// The header row has no column named exactly `text`.
    #[error("CSV must have a column named 'text' (found: {})", .columns.join(", "))]
    MissingTextColumn { columns: Vec<String> },
    /// A `text` cell is not valid UTF-8.
    #[error("Row {row} has a text value that is not valid UTF-8")]
    Encoding { row: usize },
}

/// Content-derived identity of a dataset source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SourceKey {
    pub name: String,
    pub digest: String,
}

impl SourceKey {
    pub fn from_bytes(name: &str, bytes: &[u8]) -> Self {
        Self {
            name: name.to_string(),
            digest: blake3::hash(bytes).to_hex().to_string(),
        }
    }

    /// First 12 hex characters of the digest, for display.
    pub fn short_digest(&self) -> &str {
        &self.digest[..self.digest.len().min(12)]
    }
}

impl fmt::Display for SourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.short_digest())
    }
}

/// Where a dataset comes from.
#[derive(Debug, Clone)]
pub enum DatasetSource {
    /// The sample CSV shipped with the application.
    Bundled,
    /// A CSV file on disk.
    Path(PathBuf),
    /// Raw CSV bytes, e.g. from an upload.
    Bytes { name: String, bytes: Vec<u8> },
}

impl DatasetSource {
    /// Display name and raw contents of the source.
    pub fn read(&self) -> Result<(String, Cow<'_, [u8]>), DatasetError> {
        match self {
            DatasetSource::Bundled => Ok((
                BUNDLED_DATASET_NAME.to_string(),
                Cow::Borrowed(BUNDLED_DATASET),
            )),
            DatasetSource::Path(path) => {
                let bytes = std::fs::read(path).map_err(|source| DatasetError::Io {
                    path: path.clone(),
                    source,
                })?;
                Ok((display_name(path), Cow::Owned(bytes)))
            }
            DatasetSource::Bytes { name, bytes } => {
                Ok((name.clone(), Cow::Borrowed(bytes.as_slice())))
            }
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// One text snippet and, once classified, its label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    text: String,
    sentiment: Option<Sentiment>,
}

impl Row {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sentiment: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sentiment(&self) -> Option<Sentiment> {
        self.sentiment
    }

    pub fn has_label(&self, label: Sentiment) -> bool {
        self.sentiment == Some(label)
    }

    pub(crate) fn labeled(self, label: Sentiment) -> Self {
        Self {
            text: self.text,
            sentiment: Some(label),
        }
    }
}

/// Rows as loaded from a source; none are labeled yet.
#[derive(Debug, Clone)]
pub struct Dataset {
    key: SourceKey,
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    pub fn new(key: SourceKey, columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { key, columns, rows }
    }

    /// Build an in-memory dataset from plain strings.
    pub fn from_texts<I, T>(name: &str, texts: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let rows: Vec<Row> = texts.into_iter().map(Row::new).collect();
        let mut hasher = blake3::Hasher::new();
        for row in &rows {
            hasher.update(&(row.text.len() as u64).to_le_bytes());
            hasher.update(row.text.as_bytes());
        }
        Self {
            key: SourceKey {
                name: name.to_string(),
                digest: hasher.finalize().to_hex().to_string(),
            },
            columns: vec![TEXT_COLUMN.to_string()],
            rows,
        }
    }

    pub fn key(&self) -> &SourceKey {
        &self.key
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub(crate) fn into_parts(self) -> (SourceKey, Vec<Row>) {
        (self.key, self.rows)
    }
}

/// A dataset in which every row carries a label.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedDataset {
    key: SourceKey,
    rows: Vec<Row>,
}

impl ClassifiedDataset {
    /// Callers guarantee every row is labeled.
    pub(crate) fn from_labeled(key: SourceKey, rows: Vec<Row>) -> Self {
        debug_assert!(rows.iter().all(|row| row.sentiment.is_some()));
        Self { key, rows }
    }

    pub fn key(&self) -> &SourceKey {
        &self.key
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Labels in dataset order.
    pub fn labels(&self) -> impl Iterator<Item = Sentiment> + '_ {
        self.rows.iter().filter_map(Row::sentiment)
    }

    /// Rows with `label`, in dataset order.
    pub fn rows_with(&self, label: Sentiment) -> impl Iterator<Item = &Row> + '_ {
        self.rows.iter().filter(move |row| row.has_label(label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_bytes_share_a_key() {
        let a = SourceKey::from_bytes("a.csv", b"text\nhi\n");
        let b = SourceKey::from_bytes("a.csv", b"text\nhi\n");
        let c = SourceKey::from_bytes("a.csv", b"text\nho\n");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.short_digest().len(), 12);
    }

    #[test]
    fn in_memory_keys_respect_row_boundaries() {
        let one = Dataset::from_texts("mem", ["a\nb"]);
        let two = Dataset::from_texts("mem", ["a", "b"]);
        let shifted = Dataset::from_texts("mem", ["ab", ""]);
        assert_ne!(one.key(), two.key());
        assert_ne!(two.key(), shifted.key());
        assert_eq!(two.key(), Dataset::from_texts("mem", ["a", "b"]).key());
    }

    #[test]
    fn bundled_source_parses() {
        let (name, bytes) = DatasetSource::Bundled.read().unwrap();
        assert_eq!(name, BUNDLED_DATASET_NAME);
        let dataset = parse_csv(&name, &bytes).unwrap();
        assert!(dataset.len() >= 10);
        assert!(dataset.rows().iter().all(|row| row.sentiment().is_none()));
    }

    #[test]
    fn missing_file_reports_path() {
        let source = DatasetSource::Path(PathBuf::from("/definitely/not/here.csv"));
        match source.read() {
            Err(DatasetError::Io { path, .. }) => {
                assert_eq!(path, PathBuf::from("/definitely/not/here.csv"))
            }
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
