//! Weak-label regression for prefscore items.
//!
//! The crate turns a dataset of [`Item`](prefscore_core::Item)s, of which
//! only a few carry a rule-derived weak label, into a `0..=100` score for
//! every item:
//!
//! 1. **Label extraction** with [`LabelExtractor`](prefscore_core::LabelExtractor).
//! 2. **Vectorisation** of the feature text with a [`TfidfVectorizer`]
//!    fitted once over the whole corpus.
//! 3. **Training** a [`RidgeModel`] on the labelled rows only.
//! 4. **Prediction** for every row, clipped and rounded by [`round_score`].
//!
//! [`ScoringPipeline`] sequences the stages and fails fast with
//! [`ScoringError::EmptyDataset`] or [`ScoringError::NoTrainingData`]
//! without producing partial output.
//!
//! # Examples
//!
//! ```
//! use prefscore_core::{Item, ScorerConfig};
//! use prefscore_scorer::score_items;
//!
//! # fn main() -> Result<(), prefscore_scorer::ScoringError> {
//! let items = vec![
//!     Item::new("best/超绝/a.png", "sunset beach"),
//!     Item::new("best/超绝/b.png", "sunset beach"),
//!     Item::new("inbox/c.png", "office memo"),
//! ];
//! let report = score_items(items, &ScorerConfig::default())?;
//! assert_eq!(report.training_rows, 2);
//! assert_eq!(report.items[0].predicted_score, 95);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod error;
mod matrix;
mod pipeline;
mod predict;
mod ridge;
mod vectorizer;

pub use error::ScoringError;
pub use matrix::{FeatureMatrix, SparseRow};
pub use pipeline::{ScoringPipeline, ScoringReport, score_items};
pub use predict::{predict, round_score};
pub use ridge::{DIRECT_SOLVE_LIMIT, RidgeModel, RidgeTrainer, train};
pub use vectorizer::{TfidfVectorizer, Vocabulary, tokenize, vectorize};
