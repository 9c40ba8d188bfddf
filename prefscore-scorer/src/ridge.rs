//! Ridge regression with an unpenalised intercept.
//!
//! The trainer minimises `‖Xw + b·1 − y‖² + λ‖w‖²` over the selected rows.
//! Centering the rows removes the intercept from the penalty; the weights
//! then come from whichever normal equations are smaller:
//!
//! - primal, `(XcᵀXc + λI) w = Xcᵀ yc`, when there are more training rows
//!   than columns;
//! - dual, `(XcXcᵀ + λI) α = yc` with `w = Xcᵀ α`, otherwise.
//!
//! Both systems are symmetric positive definite for `λ > 0`. Small systems
//! are assembled densely and solved by Cholesky factorisation. Larger ones
//! are solved by conjugate gradient, applying `Xc` through the sparse rows
//! and the column means so the centred matrix is never materialised.
#![forbid(unsafe_code)]

use log::info;
use ndarray::{Array1, Array2, ArrayView1};
use prefscore_core::ConfigError;

use crate::{FeatureMatrix, ScoringError, SparseRow};

/// Largest system, in unknowns, assembled densely and factorised directly.
pub const DIRECT_SOLVE_LIMIT: usize = 512;

/// Relative residual `‖r‖ / ‖b‖` at which conjugate gradient stops.
const CG_TOLERANCE: f64 = 1e-10;

/// Iteration floor for conjugate gradient; larger systems get `2·m`.
const MIN_CG_ITERATIONS: usize = 1_000;

/// A fitted linear model: one weight per vocabulary column plus a bias.
#[derive(Debug, Clone, PartialEq)]
pub struct RidgeModel {
    weights: Array1<f64>,
    bias: f64,
}

impl RidgeModel {
    /// Build a model from explicit weights and bias.
    #[must_use]
    pub const fn new(weights: Array1<f64>, bias: f64) -> Self {
        Self { weights, bias }
    }

    /// Per-column weights.
    #[must_use]
    pub const fn weights(&self) -> &Array1<f64> {
        &self.weights
    }

    /// Intercept term.
    #[must_use]
    pub const fn bias(&self) -> f64 {
        self.bias
    }

    /// Number of feature columns the model expects.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.weights.len()
    }

    /// Unclipped prediction `w·x + b` for one row.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "linear prediction adds the bias")]
    pub fn predict_raw(&self, row: &SparseRow) -> f64 {
        row.dot_dense(&self.weights) + self.bias
    }
}

/// Fits [`RidgeModel`]s with a fixed penalty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RidgeTrainer {
    regularisation: f64,
    direct_solve_limit: usize,
}

impl RidgeTrainer {
    /// Create a trainer with penalty `λ = regularisation`.
    ///
    /// # Errors
    /// Returns [`ScoringError::Config`] unless `regularisation` is finite and
    /// strictly positive.
    pub fn new(regularisation: f64) -> Result<Self, ScoringError> {
        if !regularisation.is_finite() || regularisation <= 0.0 {
            return Err(ConfigError::InvalidRegularisation {
                value: regularisation,
            }
            .into());
        }
        Ok(Self {
            regularisation,
            direct_solve_limit: DIRECT_SOLVE_LIMIT,
        })
    }

    /// Solve systems with more than `limit` unknowns iteratively.
    ///
    /// Defaults to [`DIRECT_SOLVE_LIMIT`]; a limit of zero always uses
    /// conjugate gradient.
    #[must_use]
    pub const fn with_direct_solve_limit(mut self, limit: usize) -> Self {
        self.direct_solve_limit = limit;
        self
    }

    /// Penalty applied to the weights.
    #[must_use]
    pub const fn regularisation(&self) -> f64 {
        self.regularisation
    }

    /// Largest system solved by Cholesky factorisation.
    #[must_use]
    pub const fn direct_solve_limit(&self) -> usize {
        self.direct_solve_limit
    }

    /// Fit a model on the rows of `features` listed in `training_rows`.
    ///
    /// `labels` holds one target per feature row; rows not listed are never
    /// read.
    ///
    /// # Errors
    /// Returns [`ScoringError::NoTrainingData`] when `training_rows` is empty,
    /// [`ScoringError::LabelCountMismatch`] or
    /// [`ScoringError::TrainingRowOutOfRange`] for misaligned inputs,
    /// [`ScoringError::NotPositiveDefinite`] if factorisation breaks down, and
    /// [`ScoringError::NotConverged`] if the iterative solve stalls.
    pub fn fit(
        &self,
        features: &FeatureMatrix,
        labels: &[f64],
        training_rows: &[usize],
    ) -> Result<RidgeModel, ScoringError> {
        if training_rows.is_empty() {
            return Err(ScoringError::NoTrainingData {
                rows: features.n_rows(),
            });
        }
        if labels.len() != features.n_rows() {
            return Err(ScoringError::LabelCountMismatch {
                labels: labels.len(),
                rows: features.n_rows(),
            });
        }
        let samples = training_rows
            .iter()
            .map(|&index| {
                features
                    .row(index)
                    .zip(labels.get(index).copied())
                    .ok_or(ScoringError::TrainingRowOutOfRange {
                        index,
                        rows: features.n_rows(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let rows: Vec<&SparseRow> = samples.iter().map(|&(row, _)| row).collect();
        let targets: Array1<f64> = samples.iter().map(|&(_, label)| label).collect();
        let columns = features.n_columns();
        let centre = column_means(&rows, columns);
        let target_mean = targets.mean().unwrap_or(0.0);
        let centred_targets = targets.mapv(|value| centred(value, target_mean));

        let system = CentredRows {
            rows: &rows,
            centre: &centre,
        };
        let primal = rows.len() > columns;
        let direct = rows.len().min(columns) <= self.direct_solve_limit;
        info!(
            "fitting ridge model in {} form with the {} solver ({} rows, {columns} columns)",
            if primal { "primal" } else { "dual" },
            if direct { "direct" } else { "iterative" },
            rows.len()
        );
        let weights = if primal {
            self.solve_primal(&system, &centred_targets, direct)?
        } else {
            self.solve_dual(&system, &centred_targets, direct)?
        };
        let bias = intercept(target_mean, &centre, &weights);
        Ok(RidgeModel::new(weights, bias))
    }

    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "normal equations accumulate floating-point outer products"
    )]
    fn solve_primal(
        &self,
        system: &CentredRows<'_>,
        targets: &Array1<f64>,
        direct: bool,
    ) -> Result<Array1<f64>, ScoringError> {
        let rhs = system.transpose_times(targets);
        if !direct {
            return conjugate_gradient(
                |vector| {
                    let mut product = system.transpose_times(&system.times(vector));
                    product.scaled_add(self.regularisation, vector);
                    product
                },
                &rhs,
            );
        }

        let columns = system.centre.len();
        let mut gram = Array2::<f64>::zeros((columns, columns));
        for row in system.rows {
            for &(i, xi) in row.entries() {
                for &(j, xj) in row.entries() {
                    if let Some(cell) = gram.get_mut((i, j)) {
                        *cell += xi * xj;
                    }
                }
            }
        }
        let count = system.rows.len() as f64;
        let outer = system
            .centre
            .view()
            .insert_axis(ndarray::Axis(1))
            .dot(&system.centre.view().insert_axis(ndarray::Axis(0)));
        gram.scaled_add(-count, &outer);
        gram.diag_mut().mapv_inplace(|value| value + self.regularisation);
        cholesky_solve(gram, &rhs)
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "the centred kernel matrix is assembled from dot products"
    )]
    fn solve_dual(
        &self,
        system: &CentredRows<'_>,
        targets: &Array1<f64>,
        direct: bool,
    ) -> Result<Array1<f64>, ScoringError> {
        let dual = if direct {
            let rows = system.rows;
            let offsets: Array1<f64> = rows.iter().map(|row| row.dot_dense(system.centre)).collect();
            let centre_norm = system.centre.dot(system.centre);
            let kernel = Array2::from_shape_fn((rows.len(), rows.len()), |(i, j)| {
                let (Some(left), Some(right)) = (rows.get(i), rows.get(j)) else {
                    return 0.0;
                };
                let offset_i = offsets.get(i).copied().unwrap_or(0.0);
                let offset_j = offsets.get(j).copied().unwrap_or(0.0);
                let ridge = if i == j { self.regularisation } else { 0.0 };
                left.dot(right) - offset_i - offset_j + centre_norm + ridge
            });
            cholesky_solve(kernel, targets)?
        } else {
            conjugate_gradient(
                |coefficients| {
                    let mut product = system.times(&system.transpose_times(coefficients));
                    product.scaled_add(self.regularisation, coefficients);
                    product
                },
                targets,
            )?
        };
        Ok(system.transpose_times(&dual))
    }
}

/// Training rows viewed as the column-centred matrix `Xc = X − 1·x̄ᵀ`.
struct CentredRows<'a> {
    rows: &'a [&'a SparseRow],
    centre: &'a Array1<f64>,
}

impl CentredRows<'_> {
    /// `Xc · vector`, one entry per training row.
    #[expect(clippy::float_arithmetic, reason = "centering subtracts the mean offset")]
    fn times(&self, vector: &Array1<f64>) -> Array1<f64> {
        let offset = self.centre.dot(vector);
        self.rows
            .iter()
            .map(|row| row.dot_dense(vector) - offset)
            .collect()
    }

    /// `Xcᵀ · coefficients`, one entry per column.
    #[expect(
        clippy::float_arithmetic,
        reason = "the product accumulates scaled sparse rows"
    )]
    fn transpose_times(&self, coefficients: &Array1<f64>) -> Array1<f64> {
        let mut product = Array1::<f64>::zeros(self.centre.len());
        for (row, &coefficient) in self.rows.iter().zip(coefficients.iter()) {
            for &(column, value) in row.entries() {
                if let Some(cell) = product.get_mut(column) {
                    *cell += coefficient * value;
                }
            }
        }
        product.scaled_add(-coefficients.sum(), self.centre);
        product
    }
}

/// Fit a ridge model on the given training rows.
///
/// # Errors
/// Returns [`ScoringError::Config`] for an unusable penalty and otherwise
/// propagates errors from [`RidgeTrainer::fit`].
pub fn train(
    features: &FeatureMatrix,
    labels: &[f64],
    training_rows: &[usize],
    regularisation: f64,
) -> Result<RidgeModel, ScoringError> {
    RidgeTrainer::new(regularisation)?.fit(features, labels, training_rows)
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "column means divide summed values by the row count"
)]
fn column_means(rows: &[&SparseRow], columns: usize) -> Array1<f64> {
    let mut sums = Array1::<f64>::zeros(columns);
    for row in rows {
        for &(column, value) in row.entries() {
            if let Some(cell) = sums.get_mut(column) {
                *cell += value;
            }
        }
    }
    if rows.is_empty() {
        return sums;
    }
    let count = rows.len() as f64;
    sums.mapv_inplace(|total| total / count);
    sums
}

#[expect(clippy::float_arithmetic, reason = "centering subtracts the mean")]
fn centred(value: f64, mean: f64) -> f64 {
    value - mean
}

#[expect(
    clippy::float_arithmetic,
    reason = "the intercept restores the mean removed by centering"
)]
fn intercept(target_mean: f64, centre: &Array1<f64>, weights: &Array1<f64>) -> f64 {
    target_mean - centre.dot(weights)
}

/// Solve `matrix · x = rhs` for a symmetric positive definite `matrix`.
///
/// The lower-triangular factor overwrites `matrix` in place.
#[expect(
    clippy::float_arithmetic,
    clippy::indexing_slicing,
    reason = "Cholesky factorisation indexes within the square matrix bounds"
)]
pub(crate) fn cholesky_solve(
    mut matrix: Array2<f64>,
    rhs: &Array1<f64>,
) -> Result<Array1<f64>, ScoringError> {
    let size = rhs.len();
    for j in 0..size {
        let pivot = matrix[[j, j]] - prefix_dot(matrix.row(j), matrix.row(j), j);
        if !pivot.is_finite() || pivot <= 0.0 {
            return Err(ScoringError::NotPositiveDefinite { pivot: j });
        }
        let diagonal = pivot.sqrt();
        matrix[[j, j]] = diagonal;
        for i in (j + 1)..size {
            let dot = prefix_dot(matrix.row(i), matrix.row(j), j);
            matrix[[i, j]] = (matrix[[i, j]] - dot) / diagonal;
        }
    }

    let mut forward = Array1::<f64>::zeros(size);
    for i in 0..size {
        let dot = prefix_dot(matrix.row(i), forward.view(), i);
        forward[i] = (rhs[i] - dot) / matrix[[i, i]];
    }

    let mut solution = Array1::<f64>::zeros(size);
    for i in (0..size).rev() {
        let dot: f64 = matrix
            .column(i)
            .iter()
            .zip(solution.iter())
            .skip(i + 1)
            .map(|(factor, value)| factor * value)
            .sum();
        solution[i] = (forward[i] - dot) / matrix[[i, i]];
    }
    Ok(solution)
}

/// Dot product of the first `length` entries of two vectors.
#[expect(clippy::float_arithmetic, reason = "dot products multiply entries")]
fn prefix_dot(left: ArrayView1<'_, f64>, right: ArrayView1<'_, f64>, length: usize) -> f64 {
    left.iter()
        .zip(right.iter())
        .take(length)
        .map(|(a, b)| a * b)
        .sum()
}

/// Solve `A · x = rhs` for a symmetric positive definite operator `A`.
///
/// `apply` computes `A · v`. Iteration stops once `‖rhs − A·x‖` falls to
/// [`CG_TOLERANCE`] times `‖rhs‖`.
#[expect(
    clippy::float_arithmetic,
    reason = "conjugate gradient updates floating-point iterates"
)]
pub(crate) fn conjugate_gradient<F>(apply: F, rhs: &Array1<f64>) -> Result<Array1<f64>, ScoringError>
where
    F: Fn(&Array1<f64>) -> Array1<f64>,
{
    let mut solution = Array1::<f64>::zeros(rhs.len());
    let rhs_norm = rhs.dot(rhs).sqrt();
    if rhs_norm <= 0.0 {
        return Ok(solution);
    }
    let threshold = CG_TOLERANCE * rhs_norm;
    let limit = MIN_CG_ITERATIONS.max(rhs.len().saturating_mul(2));

    let mut residual = rhs.clone();
    let mut direction = rhs.clone();
    let mut residual_sq = residual.dot(&residual);
    for _ in 0..limit {
        if residual_sq.sqrt() <= threshold {
            return Ok(solution);
        }
        let product = apply(&direction);
        let curvature = direction.dot(&product);
        if !curvature.is_finite() || curvature <= 0.0 {
            break;
        }
        let step = residual_sq / curvature;
        solution.scaled_add(step, &direction);
        residual.scaled_add(-step, &product);
        let next_sq = residual.dot(&residual);
        let ratio = next_sq / residual_sq;
        direction.mapv_inplace(|value| value * ratio);
        direction += &residual;
        residual_sq = next_sq;
    }
    let relative = residual_sq.sqrt() / rhs_norm;
    if relative <= CG_TOLERANCE {
        return Ok(solution);
    }
    Err(ScoringError::NotConverged {
        iterations: limit,
        residual: relative,
    })
}
