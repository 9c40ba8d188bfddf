//! Public configuration types for weak-label mining and model fitting.
#![forbid(unsafe_code)]

use crate::ConfigError;

/// Lowest score a rule or prediction may carry.
pub const MIN_SCORE: f64 = 0.0;
/// Highest score a rule or prediction may carry.
pub const MAX_SCORE: f64 = 100.0;
/// Sentinel marking an item without a weak label.
pub const DEFAULT_SCORE: f64 = 50.0;
/// Literal marker that precedes an explicit score inside an identifier.
pub const DEFAULT_SCORE_PREFIX: &str = "@@@评分";
/// Ridge penalty applied when fitting the model.
pub const DEFAULT_REGULARISATION: f64 = 1.0;

const DEFAULT_RULES: [(&str, f64); 6] = [
    ("特殊：100分", 100.0),
    ("特殊：98分", 98.0),
    ("超绝", 95.0),
    ("特殊画风", 90.0),
    ("超级精选", 85.0),
    ("精选", 80.0),
];

/// A single keyword and the score it assigns.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingRule {
    keyword: String,
    score: f64,
}

impl RatingRule {
    /// Literal keyword searched for inside identifiers.
    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Score assigned when the keyword matches.
    #[must_use]
    pub const fn score(&self) -> f64 {
        self.score
    }
}

/// Ordered keyword rules; earlier rules take precedence.
///
/// Keywords are matched as literal, case-sensitive substrings. When several
/// keywords occur in one identifier the rule listed first wins, so more
/// specific keywords (`超级精选`) must precede the keywords they contain
/// (`精选`).
#[derive(Debug, Clone, PartialEq)]
pub struct RatingTable {
    rules: Vec<RatingRule>,
}

impl RatingTable {
    /// Create a table with no rules.
    #[must_use]
    pub const fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Build a table from `(keyword, score)` pairs, keeping their order.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when a keyword is empty or repeated, or when a
    /// score is not a finite value in `0..=100`.
    pub fn new<I, K>(rules: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let mut table = Self::empty();
        for (keyword, score) in rules {
            table.push(keyword, score)?;
        }
        Ok(table)
    }

    /// Append a rule with the lowest precedence so far.
    ///
    /// # Errors
    /// Returns [`ConfigError`] under the same conditions as [`RatingTable::new`].
    pub fn push(&mut self, keyword: impl Into<String>, score: f64) -> Result<(), ConfigError> {
        let text = keyword.into();
        if text.is_empty() {
            return Err(ConfigError::EmptyKeyword {
                index: self.rules.len(),
            });
        }
        if !score.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&score) {
            return Err(ConfigError::KeywordScoreOutOfRange {
                keyword: text,
                score,
            });
        }
        if self.rules.iter().any(|rule| rule.keyword == text) {
            return Err(ConfigError::DuplicateKeyword { keyword: text });
        }
        self.rules.push(RatingRule {
            keyword: text,
            score,
        });
        Ok(())
    }

    /// Iterate over the rules in precedence order.
    pub fn iter(&self) -> impl Iterator<Item = &RatingRule> {
        self.rules.iter()
    }

    /// Return the first rule whose keyword occurs in `identifier`.
    #[must_use]
    pub fn first_substring_match(&self, identifier: &str) -> Option<&RatingRule> {
        self.rules
            .iter()
            .find(|rule| identifier.contains(rule.keyword.as_str()))
    }

    /// Return the first rule whose keyword equals `name`, ignoring case.
    #[must_use]
    pub fn first_exact_match(&self, name: &str) -> Option<&RatingRule> {
        let folded = name.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.keyword.to_lowercase() == folded)
    }

    /// Number of rules.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rules.len()
    }

    /// Report whether the table has no rules.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RatingTable {
    fn default() -> Self {
        let rules = DEFAULT_RULES
            .iter()
            .map(|&(keyword, score)| RatingRule {
                keyword: keyword.to_owned(),
                score,
            })
            .collect();
        Self { rules }
    }
}

/// Controls how feature text is split into tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizerOptions {
    /// Lowercase text before tokenising.
    pub lowercase: bool,
    /// Tokens shorter than this many characters are dropped.
    pub min_token_chars: usize,
    /// Tokens to drop, matched exactly against each emitted token; tokens
    /// are only lowercased first when `lowercase` is set.
    pub stop_words: Vec<String>,
}

impl TokenizerOptions {
    /// Report whether `token` survives the length and stop-word filters.
    #[must_use]
    pub fn keeps(&self, token: &str) -> bool {
        token.chars().count() >= self.min_token_chars
            && !self.stop_words.iter().any(|word| word == token)
    }
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self {
            lowercase: true,
            min_token_chars: 1,
            stop_words: Vec::new(),
        }
    }
}

/// Everything the scoring pipeline needs besides the data itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ScorerConfig {
    /// Ordered keyword rules.
    pub rating_table: RatingTable,
    /// Marker preceding an explicit score, matched case-insensitively.
    pub score_prefix: String,
    /// Sentinel for "no weak label"; such items are excluded from training.
    pub default_score: f64,
    /// Ridge penalty `λ`.
    pub regularisation: f64,
    /// Tokenizer behaviour for the vectorizer.
    pub tokenizer: TokenizerOptions,
}

impl ScorerConfig {
    /// Check the configuration can drive a run.
    ///
    /// # Errors
    /// Returns [`ConfigError::EmptyPrefix`], [`ConfigError::NonFiniteDefault`]
    /// or [`ConfigError::InvalidRegularisation`] for the matching field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.score_prefix.is_empty() {
            return Err(ConfigError::EmptyPrefix);
        }
        if !self.default_score.is_finite() {
            return Err(ConfigError::NonFiniteDefault {
                value: self.default_score,
            });
        }
        if !self.regularisation.is_finite() || self.regularisation <= 0.0 {
            return Err(ConfigError::InvalidRegularisation {
                value: self.regularisation,
            });
        }
        Ok(())
    }
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            rating_table: RatingTable::default(),
            score_prefix: DEFAULT_SCORE_PREFIX.to_owned(),
            default_score: DEFAULT_SCORE,
            regularisation: DEFAULT_REGULARISATION,
            tokenizer: TokenizerOptions::default(),
        }
    }
}
