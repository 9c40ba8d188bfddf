//! Rule-based weak labels mined from item identifiers.
//!
//! Rules are tried in order and the first one that applies wins:
//!
//! 1. the score prefix (case-insensitive) followed by decimal digits from
//!    any script, clipped to `0..=100`;
//! 2. the first [`RatingTable`] keyword found in the identifier;
//! 3. the default sentinel.
#![forbid(unsafe_code)]

use std::sync::LazyLock;

use log::debug;
use regex::{Regex, RegexBuilder};

use crate::{ConfigError, MAX_SCORE, MIN_SCORE, RatingTable, ScorerConfig};

/// Digit runs with more significant digits than this always exceed the
/// maximum score.
const MAX_SIGNIFICANT_DIGITS: usize = 3;

/// Matches a single Unicode decimal digit (general category `Nd`).
static DECIMAL_DIGIT: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^\d$"));

/// Extracts weak labels with a pre-compiled prefix matcher.
#[derive(Debug, Clone)]
pub struct LabelExtractor {
    prefix: Regex,
    rating_table: RatingTable,
    default_score: f64,
}

impl LabelExtractor {
    /// Compile an extractor for the given rules.
    ///
    /// # Errors
    /// Returns [`ConfigError::EmptyPrefix`] for an empty prefix,
    /// [`ConfigError::NonFiniteDefault`] for a NaN or infinite default, and
    /// [`ConfigError::PrefixPattern`] if the matcher cannot be compiled.
    pub fn new(
        rating_table: RatingTable,
        score_prefix: &str,
        default_score: f64,
    ) -> Result<Self, ConfigError> {
        if score_prefix.is_empty() {
            return Err(ConfigError::EmptyPrefix);
        }
        if !default_score.is_finite() {
            return Err(ConfigError::NonFiniteDefault {
                value: default_score,
            });
        }
        let prefix = prefix_matcher(score_prefix)
            .map_err(|source| ConfigError::PrefixPattern { source })?;
        debug!(
            "compiled label extractor with {} rating rules and prefix {score_prefix:?}",
            rating_table.len()
        );
        Ok(Self {
            prefix,
            rating_table,
            default_score,
        })
    }

    /// Compile an extractor from a full scorer configuration.
    ///
    /// # Errors
    /// Propagates errors from [`LabelExtractor::new`].
    pub fn from_config(config: &ScorerConfig) -> Result<Self, ConfigError> {
        Self::new(
            config.rating_table.clone(),
            &config.score_prefix,
            config.default_score,
        )
    }

    /// Return the weak label for `identifier`.
    #[must_use]
    pub fn extract(&self, identifier: &str) -> f64 {
        apply_rules(
            identifier,
            Some(&self.prefix),
            &self.rating_table,
            self.default_score,
        )
    }

    /// Return the score of the rule whose keyword equals the identifier's
    /// parent folder name, or the default.
    #[must_use]
    pub fn folder_score(&self, identifier: &str) -> f64 {
        extract_folder_score(identifier, &self.rating_table, self.default_score)
    }

    /// Report whether `label` came from a rule rather than the default.
    #[must_use]
    #[expect(
        clippy::float_cmp,
        reason = "the sentinel is assigned verbatim, so exact comparison is intended"
    )]
    pub fn is_labelled(&self, label: f64) -> bool {
        label != self.default_score
    }

    /// Sentinel returned when no rule applies.
    #[must_use]
    pub const fn default_score(&self) -> f64 {
        self.default_score
    }

    /// Rules consulted after the prefix.
    #[must_use]
    pub const fn rating_table(&self) -> &RatingTable {
        &self.rating_table
    }
}

/// Return the weak label for `identifier` without a pre-compiled extractor.
///
/// If the prefix matcher cannot be built the prefix rule is skipped and the
/// keyword rules still apply.
///
/// # Examples
///
/// ```
/// use prefscore_core::{RatingTable, extract_label};
///
/// let table = RatingTable::default();
/// assert_eq!(extract_label("x/@@@评分250.png", &table, "@@@评分", 50.0), 100.0);
/// assert_eq!(extract_label("x/精选/a.png", &table, "@@@评分", 50.0), 80.0);
/// ```
#[must_use]
pub fn extract_label(
    identifier: &str,
    rating_table: &RatingTable,
    score_prefix: &str,
    default_score: f64,
) -> f64 {
    let prefix = prefix_matcher(score_prefix).ok();
    apply_rules(identifier, prefix.as_ref(), rating_table, default_score)
}

/// Score the identifier's immediate parent folder against the rating table.
///
/// The folder name must equal a keyword in full, ignoring case; both `/` and
/// `\` separate path components. Identifiers without a parent folder score
/// the default.
#[must_use]
pub fn extract_folder_score(
    identifier: &str,
    rating_table: &RatingTable,
    default_score: f64,
) -> f64 {
    let mut components = identifier.rsplit(['/', '\\']);
    let _file_name = components.next();
    components
        .next()
        .and_then(|folder| rating_table.first_exact_match(folder))
        .map_or(default_score, |rule| rule.score())
}

fn prefix_matcher(score_prefix: &str) -> Result<Regex, regex::Error> {
    let pattern = format!(r"(?i:{})(\d+)", regex::escape(score_prefix));
    RegexBuilder::new(&pattern).build()
}

fn apply_rules(
    identifier: &str,
    prefix: Option<&Regex>,
    rating_table: &RatingTable,
    default_score: f64,
) -> f64 {
    let explicit = prefix
        .and_then(|matcher| matcher.captures(identifier))
        .and_then(|captures| captures.get(1))
        .and_then(|digits| parse_clipped(digits.as_str()));
    if let Some(score) = explicit {
        return score;
    }
    rating_table
        .first_substring_match(identifier)
        .map_or(default_score, |rule| rule.score())
}

/// Parse a run of decimal digits and clip it to the score range.
///
/// Digits from any script count, so `９５` and `٩٥` both read as 95.
/// Leading zeros are ignored and long runs clip without accumulating, so any
/// digit run yields a score; `None` is only returned for non-digit input.
fn parse_clipped(digits: &str) -> Option<f64> {
    let values = digits
        .chars()
        .map(decimal_value)
        .collect::<Option<Vec<u32>>>()?;
    if values.is_empty() {
        return None;
    }
    let significant: Vec<u32> = values.into_iter().skip_while(|&value| value == 0).collect();
    if significant.len() > MAX_SIGNIFICANT_DIGITS {
        return Some(MAX_SCORE);
    }
    let value = significant
        .iter()
        .fold(0_u32, |total, &digit| total * 10 + digit);
    Some(f64::from(value).clamp(MIN_SCORE, MAX_SCORE))
}

/// Numeric value of a decimal digit in any script.
///
/// Decimal digits are encoded in contiguous runs of ten starting at zero, so
/// a digit's value is its offset from the start of its run of digits, taken
/// modulo ten where several runs sit back to back.
fn decimal_value(candidate: char) -> Option<u32> {
    if let Some(value) = candidate.to_digit(10) {
        return Some(value);
    }
    if !is_decimal_digit(candidate) {
        return None;
    }
    let code = u32::from(candidate);
    let mut start = code;
    while let Some(previous) = start.checked_sub(1).and_then(char::from_u32)
        && is_decimal_digit(previous)
    {
        start = u32::from(previous);
    }
    code.checked_sub(start)?.checked_rem(10)
}

fn is_decimal_digit(candidate: char) -> bool {
    let mut buffer = [0_u8; 4];
    DECIMAL_DIGIT
        .as_ref()
        .is_ok_and(|matcher| matcher.is_match(candidate.encode_utf8(&mut buffer)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("7", Some(7.0))]
    #[case("007", Some(7.0))]
    #[case("000", Some(0.0))]
    #[case("100", Some(100.0))]
    #[case("101", Some(100.0))]
    #[case("99999999999999999999999", Some(100.0))]
    #[case("0000000000000000000042", Some(42.0))]
    #[case("９５", Some(95.0))]
    #[case("٩٥", Some(95.0))]
    #[case("०७", Some(7.0))]
    #[case("𝟗𝟓", Some(95.0))]
    #[case("𝟙𝟘𝟘", Some(100.0))]
    #[case("٠٠١٢٣٤", Some(100.0))]
    #[case("", None)]
    #[case("1a", None)]
    #[case("Ⅻ", None)]
    fn parse_clipped_handles_magnitude_and_padding(
        #[case] digits: &str,
        #[case] expected: Option<f64>,
    ) {
        assert_eq!(parse_clipped(digits), expected);
    }

    #[rstest]
    #[case('0', Some(0))]
    #[case('９', Some(9))]
    #[case('٣', Some(3))]
    #[case('𝟎', Some(0))]
    #[case('𝟡', Some(9))]
    #[case('𝟿', Some(9))]
    #[case('²', None)]
    #[case('x', None)]
    fn decimal_value_reads_digits_from_any_script(
        #[case] candidate: char,
        #[case] expected: Option<u32>,
    ) {
        assert_eq!(decimal_value(candidate), expected);
    }
}
