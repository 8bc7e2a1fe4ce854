//! Library exports for the sentiment dashboard, its CLI, tests and benchmarks.
/// Application directory resolution.
pub mod app_dirs;
/// Persisted dashboard settings.
pub mod config;
/// Event handlers and display surfaces.
pub mod dashboard;
/// Text datasets, validation and caching.
pub mod dataset;
/// Tracing subscriber setup.
pub mod logging;
/// Polarity scoring and classification.
pub mod sentiment;
/// Per-label aggregation.
pub mod summary;

pub use dashboard::{Dashboard, DashboardEvent, DisplaySurface};
pub use dataset::{ClassifiedDataset, Dataset, DatasetSource, Row};
pub use sentiment::{Classifier, LexiconScorer, PolarityScorer, Sentiment};
