//! Error types raised while validating scorer configuration.
#![forbid(unsafe_code)]

use thiserror::Error;

/// Errors raised when a [`ScorerConfig`](crate::ScorerConfig) or one of its
/// parts is invalid.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The explicit score prefix is empty, so it would match any digit run.
    #[error("score prefix must not be empty")]
    EmptyPrefix,
    /// A rating-table keyword is empty and would match every identifier.
    #[error("rating table keyword at position {index} is empty")]
    EmptyKeyword {
        /// Zero-based position of the rule in the table.
        index: usize,
    },
    /// The same keyword appears twice; the later rule could never fire.
    #[error("rating table keyword {keyword:?} appears more than once")]
    DuplicateKeyword {
        /// Repeated keyword.
        keyword: String,
    },
    /// A rating-table score lies outside `0..=100` or is not finite.
    #[error("score {score} for keyword {keyword:?} is outside 0..=100")]
    KeywordScoreOutOfRange {
        /// Keyword carrying the bad score.
        keyword: String,
        /// Rejected score.
        score: f64,
    },
    /// The sentinel default is NaN or infinite and could never be compared.
    #[error("default score {value} must be finite")]
    NonFiniteDefault {
        /// Rejected default.
        value: f64,
    },
    /// The ridge penalty must be finite and strictly positive.
    #[error("regularisation strength {value} must be finite and greater than zero")]
    InvalidRegularisation {
        /// Rejected penalty.
        value: f64,
    },
    /// Compiling the prefix matcher failed.
    #[error("failed to compile the score prefix pattern")]
    PrefixPattern {
        /// Source error from `regex`.
        #[source]
        source: regex::Error,
    },
}
