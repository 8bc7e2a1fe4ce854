//! Polarity scoring and three-way sentiment classification.

mod classifier;
mod label;
pub mod lexicon;
mod scorer;

pub use classifier::{Assessment, ClassifyError, Classifier};
pub use label::{NEGATIVE_THRESHOLD, POSITIVE_THRESHOLD, ParseSentimentError, Sentiment};
pub use lexicon::{Lexicon, LexiconError, LexiconScorer};
pub use scorer::{PolarityScorer, ScoreError};
