//! Error types emitted by the prefscore CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use camino::Utf8PathBuf;
use prefscore_scorer::ScoringError;
use thiserror::Error;

/// Process exit code for a successful run.
pub const EXIT_SUCCESS: u8 = 0;
/// Exit code for usage errors, unreadable input, and failed writes.
pub const EXIT_FAILURE: u8 = 1;
/// Exit code when the input table has no data rows.
pub const EXIT_EMPTY_DATASET: u8 = 2;
/// Exit code when no row carries a weak label.
pub const EXIT_NO_TRAINING_DATA: u8 = 3;

/// Errors emitted by the prefscore CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// A required positional argument was not supplied.
    #[error("missing {field} (usage: prefscore <input> <output>)")]
    MissingArgument {
        /// Name of the missing argument.
        field: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Argument naming the path.
        field: &'static str,
        /// Path as supplied.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Argument naming the path.
        field: &'static str,
        /// Path as supplied.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Argument naming the path.
        field: &'static str,
        /// Path as supplied.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The input table could not be opened or parsed.
    #[error("failed to read table {path:?}: {source}")]
    ReadTable {
        /// Path as supplied.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: csv::Error,
    },
    /// A data row has more fields than the header.
    #[error("row on line {line} of {path:?} has {found} fields; the header has {expected}")]
    RaggedRow {
        /// Path as supplied.
        path: Utf8PathBuf,
        /// One-based line number of the row.
        line: u64,
        /// Fields in the header.
        expected: usize,
        /// Fields in the row.
        found: usize,
    },
    /// Writing the scored table failed; no output was left behind.
    #[error("failed to write table {path:?}: {source}")]
    WriteTable {
        /// Path as supplied.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: csv::Error,
    },
    /// The scoring pipeline rejected the dataset.
    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

impl CliError {
    /// Process exit code reported for this error.
    ///
    /// Usage and I/O failures exit with [`EXIT_FAILURE`]; the two dataset
    /// preconditions have codes of their own.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Scoring(ScoringError::EmptyDataset) => EXIT_EMPTY_DATASET,
            Self::Scoring(ScoringError::NoTrainingData { .. }) => EXIT_NO_TRAINING_DATA,
            _ => EXIT_FAILURE,
        }
    }
}
