//! Turn raw model output into integer scores.
#![forbid(unsafe_code)]

use prefscore_core::{MAX_SCORE, MIN_SCORE};

use crate::{FeatureMatrix, RidgeModel, ScoringError};

/// Score every row of `features` with `model`.
///
/// The result has one entry per row, in row order.
///
/// # Errors
/// Returns [`ScoringError::DimensionMismatch`] when the matrix was not built
/// over the model's vocabulary.
pub fn predict(model: &RidgeModel, features: &FeatureMatrix) -> Result<Vec<u8>, ScoringError> {
    if features.n_columns() != model.dimension() {
        return Err(ScoringError::DimensionMismatch {
            expected: model.dimension(),
            found: features.n_columns(),
        });
    }
    Ok(features
        .rows()
        .map(|row| round_score(model.predict_raw(row)))
        .collect())
}

/// Clip a raw prediction to `0..=100` and round half to even.
///
/// Non-finite values score zero.
///
/// # Examples
///
/// ```
/// use prefscore_scorer::round_score;
///
/// assert_eq!(round_score(94.6), 95);
/// assert_eq!(round_score(2.5), 2);
/// assert_eq!(round_score(3.5), 4);
/// assert_eq!(round_score(-7.0), 0);
/// assert_eq!(round_score(f64::NAN), 0);
/// ```
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the value is clipped to 0..=100 and rounded before the cast"
)]
pub fn round_score(raw: f64) -> u8 {
    if !raw.is_finite() {
        return 0;
    }
    raw.clamp(MIN_SCORE, MAX_SCORE).round_ties_even() as u8
}
