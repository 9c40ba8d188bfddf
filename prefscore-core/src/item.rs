//! Dataset rows before and after scoring.
#![forbid(unsafe_code)]

/// One dataset row as seen by the scorer.
///
/// Missing source values are represented by empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Item {
    /// Path-like identifier mined for weak labels.
    pub identifier: String,
    /// Free text fed to the vectorizer.
    pub feature_text: String,
}

impl Item {
    /// Build an item from its identifier and feature text.
    #[must_use]
    pub fn new(identifier: impl Into<String>, feature_text: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            feature_text: feature_text.into(),
        }
    }
}

/// An [`Item`] annotated with its weak label and predicted score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredItem {
    /// The original row.
    pub item: Item,
    /// Rule-derived label, or the configured default when no rule fired.
    pub weak_label: f64,
    /// Exact folder-name match score, or the configured default.
    pub folder_score: f64,
    /// Model output clipped to `0..=100` and rounded.
    pub predicted_score: u8,
}
