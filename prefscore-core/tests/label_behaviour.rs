#![expect(
    clippy::expect_used,
    reason = "tests should fail fast when setup breaks"
)]

//! Behavioural coverage for weak-label extraction.

use std::cell::{Cell, RefCell};

use prefscore_core::{LabelExtractor, ScorerConfig};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[fixture]
fn extractor() -> LabelExtractor {
    LabelExtractor::from_config(&ScorerConfig::default()).expect("default config compiles")
}

#[fixture]
fn identifier() -> RefCell<String> {
    RefCell::new(String::new())
}

#[fixture]
fn result() -> Cell<f64> {
    Cell::new(f64::NAN)
}

#[given("the identifier {value}")]
fn given_identifier(#[from(identifier)] identifier: &RefCell<String>, value: String) {
    *identifier.borrow_mut() = value.trim_matches('"').to_owned();
}

#[when("I extract its weak label")]
fn when_extract(
    #[from(extractor)] extractor: &LabelExtractor,
    #[from(identifier)] identifier: &RefCell<String>,
    #[from(result)] result: &Cell<f64>,
) {
    result.set(extractor.extract(&identifier.borrow()));
}

#[when("I score its parent folder")]
fn when_folder(
    #[from(extractor)] extractor: &LabelExtractor,
    #[from(identifier)] identifier: &RefCell<String>,
    #[from(result)] result: &Cell<f64>,
) {
    result.set(extractor.folder_score(&identifier.borrow()));
}

#[then("the weak label is {expected}")]
fn then_label(expected: f64, #[from(result)] result: &Cell<f64>) {
    assert_eq!(result.get().to_bits(), expected.to_bits());
}

#[then("the folder score is {expected}")]
fn then_folder(expected: f64, #[from(result)] result: &Cell<f64>) {
    assert_eq!(result.get().to_bits(), expected.to_bits());
}

#[then("the item is unlabelled")]
fn then_unlabelled(
    #[from(extractor)] extractor: &LabelExtractor,
    #[from(result)] result: &Cell<f64>,
) {
    assert!(!extractor.is_labelled(result.get()));
}

#[scenario(path = "tests/features/label_extraction.feature", index = 0)]
fn explicit_score_beats_keyword(
    extractor: LabelExtractor,
    identifier: RefCell<String>,
    result: Cell<f64>,
) {
    let _ = (extractor, identifier, result);
}

#[scenario(path = "tests/features/label_extraction.feature", index = 1)]
fn explicit_scores_are_clipped(
    extractor: LabelExtractor,
    identifier: RefCell<String>,
    result: Cell<f64>,
) {
    let _ = (extractor, identifier, result);
}

#[scenario(path = "tests/features/label_extraction.feature", index = 2)]
fn first_listed_keyword_wins(
    extractor: LabelExtractor,
    identifier: RefCell<String>,
    result: Cell<f64>,
) {
    let _ = (extractor, identifier, result);
}

#[scenario(path = "tests/features/label_extraction.feature", index = 3)]
fn unmatched_identifiers_fall_back(
    extractor: LabelExtractor,
    identifier: RefCell<String>,
    result: Cell<f64>,
) {
    let _ = (extractor, identifier, result);
}

#[scenario(path = "tests/features/label_extraction.feature", index = 4)]
fn folder_scores_need_exact_names(
    extractor: LabelExtractor,
    identifier: RefCell<String>,
    result: Cell<f64>,
) {
    let _ = (extractor, identifier, result);
}
