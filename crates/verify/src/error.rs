//! Verification error taxonomy
//!
//! These are the fatal precondition failures: they abort the station being
//! verified before (or instead of) per-file comparison. Per-file mismatches
//! are not errors; they are recorded in the run report.

use crate::record::RecordError;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal verification errors.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// A required metadata export is absent from the mirror.
    #[error("required metadata export missing: {0}")]
    MissingExport(PathBuf),

    /// The geo export's algorithm-row count does not match the file set.
    #[error("{path}: {rows} algorithm rows for {files} waveform files")]
    GeoRowCount {
        /// The geo export
        path: PathBuf,
        /// Algorithm rows found
        rows: usize,
        /// Waveform files enumerated
        files: usize,
    },

    /// The pipeline export's row count does not match the file set.
    #[error("{path}: {rows} timing rows for {files} waveform files")]
    PipelineRowCount {
        /// The pipeline export
        path: PathBuf,
        /// Timing rows found
        rows: usize,
        /// Waveform files enumerated
        files: usize,
    },

    /// The pipeline export has no row for an enumerated waveform file.
    #[error("no timing row for {0}")]
    MissingCorrection(String),

    /// No field-names row carrying the expected column was found.
    #[error("{path}: no field-names row with column '{column}'")]
    MissingColumn {
        /// The export being read
        path: PathBuf,
        /// The column that identifies the field-names row
        column: &'static str,
    },

    /// A data row is too short for the columns the reader needs.
    #[error("{path}: row {row} is missing required fields")]
    ShortRow {
        /// The export being read
        path: PathBuf,
        /// 1-based data-row index
        row: usize,
    },

    /// A correction field does not parse as a number.
    #[error("{path}: cannot parse '{value}' as a correction")]
    BadNumber {
        /// The export being read
        path: PathBuf,
        /// The offending field
        value: String,
    },

    /// A waveform file is corrupt; distinct from a correction mismatch.
    #[error("{path}: {source}")]
    Record {
        /// The corrupt file
        path: PathBuf,
        /// What the record walk tripped over
        source: RecordError,
    },

    /// Underlying filesystem failure.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Verification result alias.
pub type Result<T> = std::result::Result<T, VerifyError>;
