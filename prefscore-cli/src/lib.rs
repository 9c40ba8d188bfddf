//! Command-line interface for scoring a table of items from weak labels.
//!
//! `prefscore <input> <output>` reads a CSV table, derives weak labels from
//! the first column, fits a text model on the feature column, and writes the
//! table back out with `weak_label` and `predicted_score` appended.
#![forbid(unsafe_code)]

use std::ffi::OsString;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use log::{debug, info};
use prefscore_core::ScorerConfig;
use prefscore_scorer::ScoringPipeline;

mod error;
mod table;

pub use error::{
    CliError, EXIT_EMPTY_DATASET, EXIT_FAILURE, EXIT_NO_TRAINING_DATA, EXIT_SUCCESS,
};

use table::Table;

const ARG_INPUT: &str = "input";
const ARG_OUTPUT: &str = "output";
const ARG_FOLDER_SCORE: &str = "folder-score";

/// Run the CLI with the current process arguments.
///
/// # Errors
/// See [`run_from`].
pub fn run() -> Result<ScoreSummary, CliError> {
    run_from(std::env::args_os())
}

/// Run the CLI with an explicit argument vector, program name first.
///
/// # Errors
/// Returns [`CliError`] for usage errors, unreadable input, scoring
/// failures, and failed writes. [`CliError::exit_code`] gives the matching
/// process exit code.
pub fn run_from<I, T>(args: I) -> Result<ScoreSummary, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = ScoreArgs::try_parse_from(args)?;
    let config = ScoreConfig::try_from(cli)?;
    config.validate_sources()?;
    run_score(&config)
}

/// Outcome of a successful run, reported by the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSummary {
    /// Where the scored table was written.
    pub output: Utf8PathBuf,
    /// Number of data rows scored.
    pub rows: usize,
    /// Number of rows that carried a weak label.
    pub training_rows: usize,
    /// Number of distinct terms in the fitted vocabulary.
    pub vocabulary_size: usize,
}

/// CLI arguments for a scoring run.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "prefscore",
    about = "Score every row of a table from the few rows that carry weak labels",
    long_about = "Read a CSV table, derive weak labels from the identifier \
                  in the first column, fit a TF-IDF ridge model on the \
                  feature text in the twelfth (or last) column, and write \
                  the table back out with weak_label and predicted_score \
                  columns appended.",
    version
)]
struct ScoreArgs {
    /// CSV table to score.
    #[arg(value_name = "input")]
    input: Option<Utf8PathBuf>,
    /// Destination for the scored table; replaced atomically.
    #[arg(value_name = "output")]
    output: Option<Utf8PathBuf>,
    /// Also append a folder_match_score column.
    #[arg(long = ARG_FOLDER_SCORE)]
    folder_score: bool,
}

/// Resolved configuration for a scoring run.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ScoreConfig {
    input: Utf8PathBuf,
    output: Utf8PathBuf,
    folder_score: bool,
}

impl ScoreConfig {
    fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.input, ARG_INPUT)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match prefscore_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<ScoreArgs> for ScoreConfig {
    type Error = CliError;

    fn try_from(args: ScoreArgs) -> Result<Self, Self::Error> {
        let input = args
            .input
            .ok_or(CliError::MissingArgument { field: ARG_INPUT })?;
        let output = args
            .output
            .ok_or(CliError::MissingArgument { field: ARG_OUTPUT })?;
        Ok(Self {
            input,
            output,
            folder_score: args.folder_score,
        })
    }
}

fn run_score(config: &ScoreConfig) -> Result<ScoreSummary, CliError> {
    let table = Table::read(&config.input)?;
    debug!(
        "read {} rows with {} columns from {}",
        table.len(),
        table.headers().len(),
        config.input
    );

    let pipeline = ScoringPipeline::new(&ScorerConfig::default())?;
    let report = pipeline.run(table.items())?;
    table.persist_scored(&config.output, &report, config.folder_score)?;
    info!(
        "scored {} rows ({} labelled, {} terms) into {}",
        report.items.len(),
        report.training_rows,
        report.vocabulary_size,
        config.output
    );

    Ok(ScoreSummary {
        output: config.output.clone(),
        rows: report.items.len(),
        training_rows: report.training_rows,
        vocabulary_size: report.vocabulary_size,
    })
}

#[cfg(test)]
mod tests;
