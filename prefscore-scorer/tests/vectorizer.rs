#![expect(
    clippy::expect_used,
    reason = "tests should fail fast when setup breaks"
)]

//! Tokenisation, vocabulary order, and TF-IDF weighting.

use prefscore_core::TokenizerOptions;
use prefscore_scorer::{FeatureMatrix, ScoringError, TfidfVectorizer, tokenize, vectorize};
use rstest::rstest;

const TOLERANCE: f64 = 1e-9;

#[rstest]
#[case("Red fox, red HEN!", &["red", "fox", "red", "hen"])]
#[case("snake_case v2.0", &["snake_case", "v2", "0"])]
#[case("夕焼け 海辺|猫", &["夕焼け", "海辺", "猫"])]
#[case("Ünïcode Straße", &["ünïcode", "straße"])]
#[case("  ...  ", &[])]
#[case("", &[])]
fn tokenises_word_runs(#[case] text: &str, #[case] expected: &[&str]) {
    let tokens = tokenize(text, &TokenizerOptions::default());

    assert_eq!(tokens, expected);
}

#[rstest]
fn keeps_case_when_lowercasing_is_disabled() {
    let options = TokenizerOptions {
        lowercase: false,
        ..TokenizerOptions::default()
    };

    assert_eq!(tokenize("Red red", &options), ["Red", "red"]);
}

#[rstest]
fn vocabulary_is_sorted_by_term() {
    let (_, vocabulary) = vectorize(&["zebra apple", "mango apple", "猫"]);

    let terms: Vec<&str> = vocabulary.terms().collect();

    assert_eq!(terms, ["apple", "mango", "zebra", "猫"]);
    assert_eq!(vocabulary.column("mango"), Some(1));
    assert_eq!(vocabulary.term(3), Some("猫"));
    assert_eq!(vocabulary.column("pear"), None);
}

#[rstest]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare floating-point weights"
)]
fn applies_smoothed_idf() {
    let vectorizer = TfidfVectorizer::fit(&["red fox", "red hen"], TokenizerOptions::default());

    let idf = vectorizer.idf();
    let fox = 1.5_f64.ln() + 1.0;

    assert_eq!(idf.len(), 3);
    assert!((idf[0] - fox).abs() < TOLERANCE, "fox idf {}", idf[0]);
    assert!((idf[1] - fox).abs() < TOLERANCE, "hen idf {}", idf[1]);
    assert!((idf[2] - 1.0).abs() < TOLERANCE, "red idf {}", idf[2]);
}

#[rstest]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare floating-point weights"
)]
fn rows_are_l2_normalised_tfidf() {
    let (matrix, _) = vectorize(&["red fox", "red hen"]);

    // Columns: fox, hen, red.
    let fox = 1.5_f64.ln() + 1.0;
    let norm = (fox * fox + 1.0).sqrt();

    assert!((matrix.value(0, 0) - fox / norm).abs() < TOLERANCE);
    assert!(matrix.value(0, 1).abs() < TOLERANCE);
    assert!((matrix.value(0, 2) - 1.0 / norm).abs() < TOLERANCE);
    for row in matrix.rows() {
        let length: f64 = row.entries().iter().map(|&(_, v)| v * v).sum();
        assert!((length - 1.0).abs() < TOLERANCE);
    }
}

#[rstest]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare floating-point weights"
)]
fn repeated_terms_count_more() {
    let (matrix, vocabulary) = vectorize(&["cat cat dog", "dog"]);
    let cat = vocabulary.column("cat").expect("cat column");
    let dog = vocabulary.column("dog").expect("dog column");

    assert!(matrix.value(0, cat) > matrix.value(0, dog));
    assert!((matrix.value(1, dog) - 1.0).abs() < TOLERANCE);
}

#[rstest]
fn empty_documents_become_zero_rows() {
    let (matrix, vocabulary) = vectorize(&["", "...", "sky"]);

    assert_eq!(matrix.n_rows(), 3);
    assert_eq!(matrix.n_columns(), vocabulary.len());
    assert_eq!(matrix.row(0).map(|row| row.nnz()), Some(0));
    assert_eq!(matrix.row(1).map(|row| row.nnz()), Some(0));
}

#[rstest]
fn corpus_without_tokens_has_no_columns() {
    let (matrix, vocabulary) = vectorize(&["", "!!"]);

    assert!(vocabulary.is_empty());
    assert_eq!(matrix.n_columns(), 0);
    assert_eq!(matrix.n_rows(), 2);
}

#[rstest]
fn fitting_is_deterministic() {
    let corpus = ["b a c", "c d", "a a e", "f"];

    let first = TfidfVectorizer::fit_transform(&corpus, TokenizerOptions::default());
    let second = TfidfVectorizer::fit_transform(&corpus, TokenizerOptions::default());

    assert_eq!(first, second);
}

#[rstest]
fn transform_matches_fit_transform_and_ignores_unseen_terms() {
    let corpus = ["sun sea", "sea salt"];
    let (vectorizer, fitted) = TfidfVectorizer::fit_transform(&corpus, TokenizerOptions::default());

    assert_eq!(vectorizer.transform(&corpus), fitted);
    let unseen = vectorizer.transform(&["moon sea"]);
    let sea = vectorizer.vocabulary().column("sea").expect("sea column");
    assert_eq!(unseen.row(0).map(|row| row.nnz()), Some(1));
    assert!(unseen.value(0, sea) > 0.0);
}

#[rstest]
fn stop_words_are_left_out_of_the_vocabulary() {
    let options = TokenizerOptions {
        stop_words: vec!["the".to_owned()],
        ..TokenizerOptions::default()
    };

    let vectorizer = TfidfVectorizer::fit(&["The cat", "the dog"], options);

    let terms: Vec<&str> = vectorizer.vocabulary().terms().collect();
    assert_eq!(terms, ["cat", "dog"]);
}

#[rstest]
fn stop_words_match_tokens_exactly_without_lowercasing() {
    let options = TokenizerOptions {
        lowercase: false,
        stop_words: vec!["the".to_owned()],
        ..TokenizerOptions::default()
    };

    assert_eq!(tokenize("The cat the", &options), ["The", "cat"]);
}

#[rstest]
fn dense_view_matches_sparse_values() {
    let (matrix, _) = vectorize(&["sun sea", "", "sea"]);

    let dense = matrix.to_dense();

    assert_eq!(dense.dim(), (3, 2));
    for ((row, column), value) in dense.indexed_iter() {
        assert_eq!(*value, matrix.value(row, column));
    }
}

#[rstest]
fn dense_rows_must_match_the_column_count() {
    let err = FeatureMatrix::from_dense(2, &[vec![1.0, 0.0], vec![1.0]]).expect_err("ragged");

    assert!(matches!(
        err,
        ScoringError::RaggedMatrix {
            row: 1,
            expected: 2,
            found: 1
        }
    ));
}
