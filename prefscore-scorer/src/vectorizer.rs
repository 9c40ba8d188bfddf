//! TF-IDF vectorisation of item feature text.
//!
//! The vectorizer is fitted once on the full corpus, labelled or not, and
//! that single fit produces the matrix used for both training and
//! prediction. Vocabulary columns follow the code-point order of the terms,
//! so the same corpus always yields the same columns and weights.
//!
//! Weighting matches the usual smoothed scheme: raw term counts multiplied
//! by `ln((1 + n) / (1 + df)) + 1`, then each row scaled to unit L2 norm.
#![forbid(unsafe_code)]

use std::collections::{BTreeMap, BTreeSet};

use prefscore_core::TokenizerOptions;

use crate::{FeatureMatrix, SparseRow};

/// Mapping from term to column, ordered by term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    terms: Vec<String>,
    columns: BTreeMap<String, usize>,
}

impl Vocabulary {
    fn from_sorted_terms(terms: Vec<String>) -> Self {
        let columns = terms
            .iter()
            .enumerate()
            .map(|(column, term)| (term.clone(), column))
            .collect();
        Self { terms, columns }
    }

    /// Column assigned to `term`, if it was seen during fitting.
    #[must_use]
    pub fn column(&self, term: &str) -> Option<usize> {
        self.columns.get(term).copied()
    }

    /// Term stored in `column`.
    #[must_use]
    pub fn term(&self, column: usize) -> Option<&str> {
        self.terms.get(column).map(String::as_str)
    }

    /// Terms in column order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    /// Number of columns.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.terms.len()
    }

    /// Report whether no term was seen.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// A fitted TF-IDF model: vocabulary plus per-column inverse document
/// frequency.
#[derive(Debug, Clone, PartialEq)]
pub struct TfidfVectorizer {
    options: TokenizerOptions,
    vocabulary: Vocabulary,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Fit the vocabulary and IDF weights on `corpus`.
    #[must_use]
    pub fn fit<S: AsRef<str>>(corpus: &[S], options: TokenizerOptions) -> Self {
        let documents = tokenize_all(corpus, &options);
        Self::fit_tokens(&documents, options)
    }

    /// Fit on `corpus` and transform it in one pass over the tokens.
    #[must_use]
    pub fn fit_transform<S: AsRef<str>>(
        corpus: &[S],
        options: TokenizerOptions,
    ) -> (Self, FeatureMatrix) {
        let documents = tokenize_all(corpus, &options);
        let vectorizer = Self::fit_tokens(&documents, options);
        let matrix = vectorizer.transform_tokens(&documents);
        (vectorizer, matrix)
    }

    /// Transform documents into rows over the fitted vocabulary.
    ///
    /// Terms unseen during fitting are ignored.
    #[must_use]
    pub fn transform<S: AsRef<str>>(&self, corpus: &[S]) -> FeatureMatrix {
        let documents = tokenize_all(corpus, &self.options);
        self.transform_tokens(&documents)
    }

    /// Split `text` into tokens using the fitted options.
    #[must_use]
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        tokenize(text, &self.options)
    }

    /// Fitted vocabulary.
    #[must_use]
    pub const fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Inverse document frequency per column.
    #[must_use]
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    /// Consume the vectorizer and keep only its vocabulary.
    #[must_use]
    pub fn into_vocabulary(self) -> Vocabulary {
        self.vocabulary
    }

    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "smoothed IDF is a logarithm of document-count ratios"
    )]
    fn fit_tokens(documents: &[Vec<String>], options: TokenizerOptions) -> Self {
        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in documents {
            let distinct: BTreeSet<&str> = tokens.iter().map(String::as_str).collect();
            for term in distinct {
                *document_frequency.entry(term).or_default() += 1;
            }
        }
        let total = documents.len() as f64;
        let idf = document_frequency
            .values()
            .map(|&df| ((1.0 + total) / (1.0 + df as f64)).ln() + 1.0)
            .collect();
        let terms = document_frequency.keys().map(|&term| term.to_owned()).collect();
        Self {
            options,
            vocabulary: Vocabulary::from_sorted_terms(terms),
            idf,
        }
    }

    fn transform_tokens(&self, documents: &[Vec<String>]) -> FeatureMatrix {
        let rows = documents
            .iter()
            .map(|tokens| self.weigh(tokens))
            .collect();
        FeatureMatrix::from_sparse_rows(self.vocabulary.len(), rows)
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "TF-IDF weighting and L2 normalisation use floating-point maths"
    )]
    fn weigh(&self, tokens: &[String]) -> SparseRow {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for column in tokens.iter().filter_map(|token| self.vocabulary.column(token)) {
            *counts.entry(column).or_default() += 1.0;
        }
        let weighted: Vec<(usize, f64)> = counts
            .into_iter()
            .filter_map(|(column, count)| self.idf.get(column).map(|idf| (column, count * idf)))
            .collect();
        let norm = weighted
            .iter()
            .map(|&(_, value)| value * value)
            .sum::<f64>()
            .sqrt();
        if norm == 0.0 {
            return SparseRow::from_sorted(weighted);
        }
        SparseRow::from_sorted(
            weighted
                .into_iter()
                .map(|(column, value)| (column, value / norm))
                .collect(),
        )
    }
}

/// Fit a vectorizer with default tokenizer options and transform `corpus`.
///
/// # Examples
///
/// ```
/// use prefscore_scorer::vectorize;
///
/// let (matrix, vocabulary) = vectorize(&["red fox", "red hen"]);
/// assert_eq!(matrix.n_rows(), 2);
/// assert_eq!(vocabulary.terms().collect::<Vec<_>>(), ["fox", "hen", "red"]);
/// ```
#[must_use]
pub fn vectorize<S: AsRef<str>>(corpus: &[S]) -> (FeatureMatrix, Vocabulary) {
    let (vectorizer, matrix) = TfidfVectorizer::fit_transform(corpus, TokenizerOptions::default());
    (matrix, vectorizer.into_vocabulary())
}

/// Split text into maximal runs of word characters.
///
/// Word characters are Unicode letters and digits plus `_`.
#[must_use]
pub fn tokenize(text: &str, options: &TokenizerOptions) -> Vec<String> {
    let source = if options.lowercase {
        text.to_lowercase()
    } else {
        text.to_owned()
    };
    source
        .split(|ch: char| !is_word_char(ch))
        .filter(|token| !token.is_empty() && options.keeps(token))
        .map(str::to_owned)
        .collect()
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

fn tokenize_all<S: AsRef<str>>(corpus: &[S], options: &TokenizerOptions) -> Vec<Vec<String>> {
    corpus
        .iter()
        .map(|text| tokenize(text.as_ref(), options))
        .collect()
}
