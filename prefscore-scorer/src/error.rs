//! Error types raised while vectorising, training, or predicting.
#![forbid(unsafe_code)]

use prefscore_core::ConfigError;
use thiserror::Error;

/// Errors raised by the scoring pipeline and its stages.
#[derive(Debug, Error)]
pub enum ScoringError {
    /// The dataset has no rows; nothing was attempted.
    #[error("input dataset has no rows")]
    EmptyDataset,
    /// No item carries a weak label, so there is nothing to fit.
    #[error("no training data: none of the {rows} items carries a weak label")]
    NoTrainingData {
        /// Number of rows in the dataset.
        rows: usize,
    },
    /// A feature matrix does not match the model's dimension.
    #[error("feature matrix has {found} columns but the model expects {expected}")]
    DimensionMismatch {
        /// Columns the model was trained on.
        expected: usize,
        /// Columns supplied.
        found: usize,
    },
    /// A dense row has a different length from the declared column count.
    #[error("row {row} has {found} values but the matrix has {expected} columns")]
    RaggedMatrix {
        /// Offending row.
        row: usize,
        /// Declared column count.
        expected: usize,
        /// Values found in the row.
        found: usize,
    },
    /// The label vector does not align with the feature rows.
    #[error("{labels} labels supplied for {rows} feature rows")]
    LabelCountMismatch {
        /// Number of labels supplied.
        labels: usize,
        /// Number of feature rows.
        rows: usize,
    },
    /// A training index points past the end of the feature matrix.
    #[error("training row {index} is outside the {rows}-row feature matrix")]
    TrainingRowOutOfRange {
        /// Rejected index.
        index: usize,
        /// Number of feature rows.
        rows: usize,
    },
    /// The regularised system could not be factorised.
    #[error("ridge system is not positive definite at pivot {pivot}")]
    NotPositiveDefinite {
        /// Diagonal position where factorisation failed.
        pivot: usize,
    },
    /// Conjugate gradient hit its iteration cap above the residual tolerance.
    #[error("ridge solve did not converge after {iterations} iterations (relative residual {residual:e})")]
    NotConverged {
        /// Iterations performed.
        iterations: usize,
        /// Final `‖r‖ / ‖b‖`.
        residual: f64,
    },
    /// The scorer configuration is invalid.
    #[error("invalid scorer configuration")]
    Config(#[from] ConfigError),
}
