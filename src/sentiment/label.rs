use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Polarity strictly above this value is Positive.
pub const POSITIVE_THRESHOLD: f64 = 0.1;
/// Polarity strictly below this value is Negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.1;

/// Discrete sentiment category assigned to a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Every label in display order.
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    /// Map a polarity onto a label using the fixed, symmetric thresholds.
    ///
    /// The band `[-0.1, 0.1]` is Neutral, boundaries included.
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > POSITIVE_THRESHOLD {
            Sentiment::Positive
        } else if polarity < NEGATIVE_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }

    /// Emoji shortcode shown next to a live verdict.
    pub fn indicator(self) -> &'static str {
        match self {
            Sentiment::Positive => "smiley",
            Sentiment::Neutral => "neutral_face",
            Sentiment::Negative => "disappointed",
        }
    }

    /// Position in [`Sentiment::ALL`].
    pub fn index(self) -> usize {
        match self {
            Sentiment::Positive => 0,
            Sentiment::Neutral => 1,
            Sentiment::Negative => 2,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no sentiment label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sentiment label `{0}` (expected Positive, Neutral or Negative)")]
pub struct ParseSentimentError(pub String);

impl FromStr for Sentiment {
    type Err = ParseSentimentError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Sentiment::ALL
            .into_iter()
            .find(|label| label.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseSentimentError(trimmed.to_string()))
    }
}
