use std::collections::HashMap;

use sentiboard::sentiment::{PolarityScorer, ScoreError};

/// Returns fixed polarities for known texts and 0.0 for everything else.
pub struct FixedScorer {
    table: HashMap<String, f64>,
}

impl FixedScorer {
    pub fn new(entries: &[(&str, f64)]) -> Self {
        Self {
            table: entries
                .iter()
                .map(|(text, polarity)| (text.to_string(), *polarity))
                .collect(),
        }
    }
}

impl PolarityScorer for FixedScorer {
    fn score(&self, text: &str) -> Result<f64, ScoreError> {
        Ok(self.table.get(text).copied().unwrap_or(0.0))
    }
}
