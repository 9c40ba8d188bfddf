//! Core domain types for the prefscore preference scorer.
//!
//! An [`Item`] pairs a path-like identifier with a free-text feature string.
//! Most items carry no ground-truth score, so the crate mines a *weak label*
//! from the identifier alone: an explicit score marker such as `@@@评分87`
//! wins, then the first keyword of an ordered [`RatingTable`] found in the
//! identifier, and otherwise a sentinel default that marks the item as
//! unlabelled.
//!
//! The numeric pipeline that turns these sparse labels into a score for
//! every item lives in `prefscore-scorer`; this crate only holds the shared
//! vocabulary of types and the rule-based [`LabelExtractor`].
//!
//! # Examples
//!
//! ```
//! use prefscore_core::{LabelExtractor, ScorerConfig};
//!
//! # fn main() -> Result<(), prefscore_core::ConfigError> {
//! let extractor = LabelExtractor::from_config(&ScorerConfig::default())?;
//! assert_eq!(extractor.extract("albums/@@@评分87/cat.png"), 87.0);
//! assert_eq!(extractor.extract("albums/超绝/cat.png"), 95.0);
//! assert_eq!(extractor.extract("albums/misc/cat.png"), 50.0);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
mod error;
mod item;
mod label;

pub use config::{
    DEFAULT_REGULARISATION, DEFAULT_SCORE, DEFAULT_SCORE_PREFIX, MAX_SCORE, MIN_SCORE,
    RatingRule, RatingTable, ScorerConfig, TokenizerOptions,
};
pub use error::ConfigError;
pub use item::{Item, ScoredItem};
pub use label::{LabelExtractor, extract_folder_score, extract_label};
