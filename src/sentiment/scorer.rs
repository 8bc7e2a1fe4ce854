use thiserror::Error;

/// Failure to turn a piece of text into a polarity.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    /// Input exceeds the scorer's accepted length.
    #[error("text is {len} characters long; the scorer accepts at most {max}")]
    TooLong { len: usize, max: usize },
    /// The scorer produced NaN or an infinite value.
    #[error("scorer produced a non-finite polarity")]
    NonFinite,
}

/// Source of continuous polarity scores in `[-1.0, 1.0]`.
///
/// Implementations must be free of side effects so that the same text always
/// lands in the same category.
pub trait PolarityScorer {
    fn score(&self, text: &str) -> Result<f64, ScoreError>;
}

impl<S: PolarityScorer + ?Sized> PolarityScorer for &S {
    fn score(&self, text: &str) -> Result<f64, ScoreError> {
        (**self).score(text)
    }
}

impl<S: PolarityScorer + ?Sized> PolarityScorer for Box<S> {
    fn score(&self, text: &str) -> Result<f64, ScoreError> {
        (**self).score(text)
    }
}

/// Reject non-finite scores and pin the rest into the polarity range.
pub(crate) fn checked_polarity(raw: f64) -> Result<f64, ScoreError> {
    if !raw.is_finite() {
        return Err(ScoreError::NonFinite);
    }
    Ok(raw.clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_polarity_clamps_and_rejects_nan() {
        assert_eq!(checked_polarity(1.7), Ok(1.0));
        assert_eq!(checked_polarity(-3.0), Ok(-1.0));
        assert_eq!(checked_polarity(0.25), Ok(0.25));
        assert_eq!(checked_polarity(f64::NAN), Err(ScoreError::NonFinite));
        assert_eq!(checked_polarity(f64::INFINITY), Err(ScoreError::NonFinite));
    }
}
