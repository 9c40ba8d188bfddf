//! Read the input table and write the scored copy.
//!
//! Column positions, not names, carry meaning: the first column holds the
//! identifier and the twelfth (or the last, for narrower tables) holds the
//! feature text. Missing cells read as empty strings.

use std::io::{Read, Write};

use camino::Utf8Path;
use csv::{ReaderBuilder, Terminator, WriterBuilder};
use prefscore_core::Item;
use prefscore_fs::{open_utf8_file, write_atomic};
use prefscore_scorer::ScoringReport;

use crate::CliError;

/// Zero-based position of the feature text column when the table is wide
/// enough to have one.
pub(crate) const FEATURE_COLUMN: usize = 11;
/// Zero-based position of the identifier column.
pub(crate) const IDENTIFIER_COLUMN: usize = 0;
/// Header of the appended weak-label column.
pub(crate) const WEAK_LABEL_HEADER: &str = "weak_label";
/// Header of the appended predicted-score column.
pub(crate) const PREDICTED_SCORE_HEADER: &str = "predicted_score";
/// Header of the optional folder-match column.
pub(crate) const FOLDER_SCORE_HEADER: &str = "folder_match_score";

const BYTE_ORDER_MARK: &[u8] = b"\xEF\xBB\xBF";
const BYTE_ORDER_MARK_CHAR: char = '\u{feff}';

/// An input table held in memory, header first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Read the table stored at `path`.
    pub(crate) fn read(path: &Utf8Path) -> Result<Self, CliError> {
        let file = open_utf8_file(path).map_err(|source| CliError::ReadTable {
            path: path.to_path_buf(),
            source: source.into(),
        })?;
        Self::from_reader(file, path)
    }

    /// Parse a table from `source`; `path` only labels errors.
    pub(crate) fn from_reader<R: Read>(source: R, path: &Utf8Path) -> Result<Self, CliError> {
        let read_error = |source| CliError::ReadTable {
            path: path.to_path_buf(),
            source,
        };
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(source);
        let headers: Vec<String> = reader
            .headers()
            .map_err(read_error)?
            .iter()
            .enumerate()
            .map(|(index, header)| {
                if index == 0 {
                    header.trim_start_matches(BYTE_ORDER_MARK_CHAR).to_owned()
                } else {
                    header.to_owned()
                }
            })
            .collect();

        let mut rows = Vec::new();
        for entry in reader.records() {
            let record = entry.map_err(read_error)?;
            if record.len() > headers.len() {
                return Err(CliError::RaggedRow {
                    path: path.to_path_buf(),
                    line: record.position().map_or(0, csv::Position::line),
                    expected: headers.len(),
                    found: record.len(),
                });
            }
            rows.push(record.iter().map(str::to_owned).collect());
        }
        Ok(Self { headers, rows })
    }

    /// Column names in input order.
    pub(crate) fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows.
    pub(crate) const fn len(&self) -> usize {
        self.rows.len()
    }

    /// Column holding the feature text, if the table has any column.
    pub(crate) const fn feature_column(&self) -> Option<usize> {
        if self.headers.len() > FEATURE_COLUMN {
            Some(FEATURE_COLUMN)
        } else {
            self.headers.len().checked_sub(1)
        }
    }

    /// Convert every row into an [`Item`], in row order.
    pub(crate) fn items(&self) -> Vec<Item> {
        let feature = self.feature_column();
        self.rows
            .iter()
            .map(|row| {
                Item::new(
                    cell(row, Some(IDENTIFIER_COLUMN)),
                    cell(row, feature),
                )
            })
            .collect()
    }

    /// Write the table with the scoring columns appended.
    ///
    /// Output starts with a UTF-8 byte-order mark; short rows are padded so
    /// the appended columns stay aligned with their headers.
    pub(crate) fn write_scored<W: Write>(
        &self,
        mut sink: W,
        report: &ScoringReport,
        folder_score: bool,
    ) -> Result<(), csv::Error> {
        sink.write_all(BYTE_ORDER_MARK)?;
        let mut writer = WriterBuilder::new()
            .terminator(Terminator::Any(b'\n'))
            .from_writer(sink);

        let mut header = self.headers.clone();
        header.push(WEAK_LABEL_HEADER.to_owned());
        header.push(PREDICTED_SCORE_HEADER.to_owned());
        if folder_score {
            header.push(FOLDER_SCORE_HEADER.to_owned());
        }
        writer.write_record(&header)?;

        let width = self.headers.len();
        for (row, scored) in self.rows.iter().zip(&report.items) {
            let mut record: Vec<String> = row.clone();
            record.resize(width.max(row.len()), String::new());
            record.push(format_label(scored.weak_label));
            record.push(scored.predicted_score.to_string());
            if folder_score {
                record.push(format_label(scored.folder_score));
            }
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Write the scored table to `path` atomically.
    ///
    /// Either the whole table lands at `path` or nothing does.
    pub(crate) fn persist_scored(
        &self,
        path: &Utf8Path,
        report: &ScoringReport,
        folder_score: bool,
    ) -> Result<(), CliError> {
        write_atomic(path, |sink| self.write_scored(sink, report, folder_score)).map_err(
            |source| CliError::WriteTable {
                path: path.to_path_buf(),
                source,
            },
        )
    }
}

fn cell(row: &[String], column: Option<usize>) -> String {
    column
        .and_then(|index| row.get(index))
        .cloned()
        .unwrap_or_default()
}

/// Labels keep a decimal point, so `95` is written as `95.0`.
fn format_label(value: f64) -> String {
    format!("{value:?}")
}
