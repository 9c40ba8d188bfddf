//! Facade crate for the prefscore weak-label scorer.
//!
//! This crate re-exports the domain types and label rules from
//! `prefscore-core` together with the vectoriser, ridge trainer, and
//! pipeline from `prefscore-scorer`.
//!
//! ```
//! use prefscore::{Item, ScorerConfig, score_items};
//!
//! # fn main() -> Result<(), prefscore::ScoringError> {
//! let items = vec![
//!     Item::new("shots/@@@评分72/a.png", "harbour at dusk"),
//!     Item::new("shots/b.png", "harbour at noon"),
//! ];
//! let report = score_items(items, &ScorerConfig::default())?;
//! assert_eq!(report.items[1].predicted_score, 72);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub use prefscore_core::{
    ConfigError, DEFAULT_REGULARISATION, DEFAULT_SCORE, DEFAULT_SCORE_PREFIX, Item, LabelExtractor,
    MAX_SCORE, MIN_SCORE, RatingRule, RatingTable, ScoredItem, ScorerConfig, TokenizerOptions,
    extract_folder_score, extract_label,
};

pub use prefscore_scorer::{
    FeatureMatrix, RidgeModel, RidgeTrainer, ScoringError, ScoringPipeline, ScoringReport,
    SparseRow, TfidfVectorizer, Vocabulary, predict, round_score, score_items, tokenize, train,
    vectorize,
};
