//! Sequence label extraction, vectorisation, training, and prediction.
#![forbid(unsafe_code)]

use std::time::Instant;

use log::{debug, info, warn};
use prefscore_core::{Item, LabelExtractor, ScoredItem, ScorerConfig, TokenizerOptions};

use crate::{RidgeTrainer, ScoringError, TfidfVectorizer, predict};

/// Below this many labelled items the fitted weights tend to be unstable.
const RECOMMENDED_TRAINING_ROWS: usize = 50;

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringReport {
    /// Scored items in input order.
    pub items: Vec<ScoredItem>,
    /// Number of items that carried a weak label and were used for fitting.
    pub training_rows: usize,
    /// Number of distinct terms in the fitted vocabulary.
    pub vocabulary_size: usize,
}

/// A validated scorer ready to run over datasets.
///
/// Each [`ScoringPipeline::run`] fits a fresh vocabulary and model; nothing
/// carries over between runs.
#[derive(Debug, Clone)]
pub struct ScoringPipeline {
    extractor: LabelExtractor,
    trainer: RidgeTrainer,
    tokenizer: TokenizerOptions,
}

impl ScoringPipeline {
    /// Validate `config` and compile its label rules.
    ///
    /// # Errors
    /// Returns [`ScoringError::Config`] when the configuration is invalid.
    pub fn new(config: &ScorerConfig) -> Result<Self, ScoringError> {
        config.validate()?;
        Ok(Self {
            extractor: LabelExtractor::from_config(config)?,
            trainer: RidgeTrainer::new(config.regularisation)?,
            tokenizer: config.tokenizer.clone(),
        })
    }

    /// Label extractor used by this pipeline.
    #[must_use]
    pub const fn extractor(&self) -> &LabelExtractor {
        &self.extractor
    }

    /// Score every item.
    ///
    /// No partial output is produced: either every item is scored or an
    /// error is returned.
    ///
    /// # Errors
    /// Returns [`ScoringError::EmptyDataset`] for an empty input, before any
    /// other work, and [`ScoringError::NoTrainingData`] when no item carries
    /// a weak label.
    pub fn run(&self, items: Vec<Item>) -> Result<ScoringReport, ScoringError> {
        if items.is_empty() {
            return Err(ScoringError::EmptyDataset);
        }
        info!("scoring {} items", items.len());

        let labels_started = Instant::now();
        let labels: Vec<f64> = items
            .iter()
            .map(|item| self.extractor.extract(&item.identifier))
            .collect();
        debug!("extracted weak labels in {:?}", labels_started.elapsed());

        let vectorise_started = Instant::now();
        let corpus: Vec<&str> = items.iter().map(|item| item.feature_text.as_str()).collect();
        let (vectorizer, features) =
            TfidfVectorizer::fit_transform(&corpus, self.tokenizer.clone());
        let vocabulary_size = vectorizer.vocabulary().len();
        debug!(
            "vectorised {} documents over {vocabulary_size} terms in {:?}",
            features.n_rows(),
            vectorise_started.elapsed()
        );

        let training_rows: Vec<usize> = labels
            .iter()
            .enumerate()
            .filter(|&(_, &label)| self.extractor.is_labelled(label))
            .map(|(index, _)| index)
            .collect();
        info!(
            "{} of {} items carry a weak label",
            training_rows.len(),
            items.len()
        );
        if !training_rows.is_empty() && training_rows.len() < RECOMMENDED_TRAINING_ROWS {
            warn!(
                "only {} labelled items; predicted scores may be unstable",
                training_rows.len()
            );
        }

        let fit_started = Instant::now();
        let model = self.trainer.fit(&features, &labels, &training_rows)?;
        debug!("fitted ridge model in {:?}", fit_started.elapsed());

        let predict_started = Instant::now();
        let scores = predict(&model, &features)?;
        debug!("predicted {} scores in {:?}", scores.len(), predict_started.elapsed());

        let scored = items
            .into_iter()
            .zip(labels)
            .zip(scores)
            .map(|((item, weak_label), predicted_score)| ScoredItem {
                folder_score: self.extractor.folder_score(&item.identifier),
                item,
                weak_label,
                predicted_score,
            })
            .collect();
        Ok(ScoringReport {
            items: scored,
            training_rows: training_rows.len(),
            vocabulary_size,
        })
    }
}

/// Score `items` with a one-off pipeline built from `config`.
///
/// # Errors
/// Propagates errors from [`ScoringPipeline::new`] and
/// [`ScoringPipeline::run`].
pub fn score_items(
    items: Vec<Item>,
    config: &ScorerConfig,
) -> Result<ScoringReport, ScoringError> {
    ScoringPipeline::new(config)?.run(items)
}
