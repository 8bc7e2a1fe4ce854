//! Rule-based English polarity scorer.
//!
//! Each known word carries a polarity. Negations flip and damp the next
//! scored word, intensifiers scale it, and the text's polarity is the mean of
//! the scored words. Users can extend or override the built-in tables with a
//! `lexicon.toml` file.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use super::scorer::{PolarityScorer, ScoreError, checked_polarity};

/// Default name of the user lexicon file inside the app directory.
pub const LEXICON_FILE_NAME: &str = "lexicon.toml";
/// Default upper bound on the number of characters scored in one call.
pub const DEFAULT_MAX_TEXT_CHARS: usize = 10_000;

/// Factor applied to a word's polarity when it follows a negation.
const NEGATION_FACTOR: f64 = -0.5;
/// Unscored tokens a pending negation or intensifier survives.
const MODIFIER_WINDOW: usize = 3;

const BUILTIN_WORDS: &[(&str, f64)] = &[
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("beautiful", 0.85),
    ("best", 1.0),
    ("better", 0.5),
    ("brilliant", 0.9),
    ("cheerful", 0.6),
    ("clean", 0.37),
    ("comfortable", 0.4),
    ("cool", 0.35),
    ("delicious", 1.0),
    ("delighted", 0.7),
    ("easy", 0.43),
    ("enjoy", 0.4),
    ("enjoyed", 0.4),
    ("excellent", 1.0),
    ("excited", 0.375),
    ("fantastic", 0.4),
    ("fast", 0.2),
    ("fine", 0.42),
    ("friendly", 0.375),
    ("fun", 0.3),
    ("glad", 0.5),
    ("good", 0.7),
    ("great", 0.8),
    ("happy", 0.8),
    ("helpful", 0.5),
    ("impressive", 1.0),
    ("incredible", 0.9),
    ("love", 0.5),
    ("loved", 0.7),
    ("lovely", 0.5),
    ("nice", 0.6),
    ("perfect", 1.0),
    ("pleasant", 0.73),
    ("recommend", 0.3),
    ("reliable", 0.5),
    ("smooth", 0.4),
    ("superb", 1.0),
    ("thank", 0.2),
    ("thanks", 0.2),
    ("useful", 0.3),
    ("wonderful", 1.0),
    ("worth", 0.3),
    ("okay", 0.05),
    ("ok", 0.05),
    ("average", -0.05),
    ("annoying", -0.8),
    ("angry", -0.5),
    ("awful", -1.0),
    ("bad", -0.7),
    ("boring", -1.0),
    ("broken", -0.4),
    ("cheap", 0.0),
    ("confusing", -0.3),
    ("dirty", -0.6),
    ("disappointed", -0.75),
    ("disappointing", -0.6),
    ("disgusting", -1.0),
    ("dull", -0.3),
    ("expensive", -0.5),
    ("fail", -0.5),
    ("failed", -0.5),
    ("frustrating", -0.4),
    ("hate", -0.8),
    ("hated", -0.9),
    ("horrible", -1.0),
    ("late", -0.3),
    ("mediocre", -0.4),
    ("poor", -0.4),
    ("rude", -0.6),
    ("sad", -0.5),
    ("slow", -0.3),
    ("terrible", -1.0),
    ("ugly", -0.7),
    ("unhappy", -0.6),
    ("useless", -0.5),
    ("waste", -0.4),
    ("worse", -0.4),
    ("worst", -1.0),
    ("wrong", -0.5),
];

const BUILTIN_INTENSIFIERS: &[(&str, f64)] = &[
    ("absolutely", 1.8),
    ("extremely", 2.0),
    ("highly", 1.5),
    ("incredibly", 1.8),
    ("quite", 1.1),
    ("really", 1.5),
    ("so", 1.3),
    ("super", 1.6),
    ("totally", 1.6),
    ("very", 1.3),
    ("fairly", 0.8),
    ("slightly", 0.5),
    ("somewhat", 0.7),
    ("barely", 0.4),
];

const BUILTIN_NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "none", "nothing", "nobody", "cannot", "without",
    "hardly",
];

/// Errors raised while loading a user lexicon file.
#[derive(Debug, Error)]
pub enum LexiconError {
    /// Failed to read the lexicon file.
    #[error("Failed to read lexicon {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The lexicon file is not valid TOML for the expected layout.
    #[error("Invalid lexicon {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// A word polarity falls outside `[-1, 1]`.
    #[error("Polarity {value} for `{word}` is outside [-1, 1]")]
    PolarityOutOfRange { word: String, value: f64 },
    /// An intensifier multiplier is negative or non-finite.
    #[error("Intensifier {value} for `{word}` must be a finite, non-negative number")]
    InvalidIntensifier { word: String, value: f64 },
    /// The entry can never match a token, e.g. it contains digits or accents.
    #[error("`{word}` is not a plain lowercase word and would never match")]
    UnmatchableWord { word: String },
}

/// On-disk layout of `lexicon.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LexiconFile {
    #[serde(default)]
    pub words: BTreeMap<String, f64>,
    #[serde(default)]
    pub intensifiers: BTreeMap<String, f64>,
    #[serde(default)]
    pub negations: Vec<String>,
}

/// Word tables consulted by [`LexiconScorer`].
#[derive(Debug, Clone)]
pub struct Lexicon {
    words: HashMap<String, f64>,
    intensifiers: HashMap<String, f64>,
    negations: HashSet<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Lexicon {
    /// The bundled general-purpose English tables.
    pub fn builtin() -> Self {
        Self {
            words: owned_pairs(BUILTIN_WORDS),
            intensifiers: owned_pairs(BUILTIN_INTENSIFIERS),
            negations: BUILTIN_NEGATIONS.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Layer user entries over the current tables; user values win.
    ///
    /// Every entry is checked before any is applied, so a rejected file leaves
    /// the tables untouched.
    pub fn merge(&mut self, file: LexiconFile) -> Result<(), LexiconError> {
        let mut words = Vec::with_capacity(file.words.len());
        for (word, value) in file.words {
            if !value.is_finite() || !(-1.0..=1.0).contains(&value) {
                return Err(LexiconError::PolarityOutOfRange { word, value });
            }
            words.push((token_key(word)?, value));
        }
        let mut intensifiers = Vec::with_capacity(file.intensifiers.len());
        for (word, value) in file.intensifiers {
            if !value.is_finite() || value < 0.0 {
                return Err(LexiconError::InvalidIntensifier { word, value });
            }
            intensifiers.push((token_key(word)?, value));
        }
        let negations = file
            .negations
            .into_iter()
            .map(token_key)
            .collect::<Result<Vec<_>, _>>()?;

        self.words.extend(words);
        self.intensifiers.extend(intensifiers);
        self.negations.extend(negations);
        Ok(())
    }

    /// Built-in tables extended by the lexicon file at `path`.
    pub fn with_overrides_from(path: &Path) -> Result<Self, LexiconError> {
        let text = std::fs::read_to_string(path).map_err(|source| LexiconError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: LexiconFile = toml::from_str(&text).map_err(|source| LexiconError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let mut lexicon = Self::builtin();
        lexicon.merge(file)?;
        tracing::debug!("Loaded lexicon overrides from {}", path.display());
        Ok(lexicon)
    }

    pub fn polarity(&self, word: &str) -> Option<f64> {
        self.words.get(word).copied()
    }

    pub fn intensity(&self, word: &str) -> Option<f64> {
        self.intensifiers.get(word).copied()
    }

    pub fn is_negation(&self, word: &str) -> bool {
        self.negations.contains(word) || word.ends_with("n't")
    }
}

fn owned_pairs(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
    pairs
        .iter()
        .map(|(word, value)| (word.to_string(), *value))
        .collect()
}

fn word_regex() -> &'static Regex {
    static WORDS: OnceLock<Regex> = OnceLock::new();
    WORDS.get_or_init(|| Regex::new(r"[a-z]+(?:'[a-z]+)*").expect("word regex must compile"))
}

/// Lowercase `word` and make sure [`tokenize`] can produce it.
fn token_key(word: String) -> Result<String, LexiconError> {
    let key = word.trim().to_lowercase();
    let whole = word_regex()
        .find(&key)
        .is_some_and(|m| m.start() == 0 && m.end() == key.len());
    if whole {
        Ok(key)
    } else {
        Err(LexiconError::UnmatchableWord { word })
    }
}

/// Lowercased word tokens of `text`, apostrophes inside words kept.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    word_regex()
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// [`PolarityScorer`] backed by a [`Lexicon`].
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    lexicon: Lexicon,
    max_chars: usize,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new(Lexicon::builtin())
    }
}

impl LexiconScorer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self {
            lexicon,
            max_chars: DEFAULT_MAX_TEXT_CHARS,
        }
    }

    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }
}

impl PolarityScorer for LexiconScorer {
    fn score(&self, text: &str) -> Result<f64, ScoreError> {
        let len = text.chars().count();
        if len > self.max_chars {
            return Err(ScoreError::TooLong {
                len,
                max: self.max_chars,
            });
        }
        if text.trim().is_empty() {
            return Ok(0.0);
        }

        let mut total = 0.0;
        let mut scored = 0usize;
        let mut negated = false;
        let mut intensity = 1.0;
        let mut idle = 0usize;
        for token in tokenize(text) {
            if self.lexicon.is_negation(&token) {
                negated = true;
                idle = 0;
                continue;
            }
            if let Some(multiplier) = self.lexicon.intensity(&token) {
                intensity *= multiplier;
                idle = 0;
                continue;
            }
            let Some(polarity) = self.lexicon.polarity(&token) else {
                idle += 1;
                if idle > MODIFIER_WINDOW {
                    negated = false;
                    intensity = 1.0;
                }
                continue;
            };
            let mut value = polarity * intensity;
            if negated {
                value *= NEGATION_FACTOR;
            }
            total += value;
            scored += 1;
            negated = false;
            intensity = 1.0;
            idle = 0;
        }

        if scored == 0 {
            return Ok(0.0);
        }
        checked_polarity(total / scored as f64)
    }
}
