//! Metadata-export readers
//!
//! Exports are line-oriented: a variable number of leading comment lines,
//! then a field-names row, then comma-separated data rows. The field-names
//! row is located by the presence of a known column name, so the exact
//! number of leading comment lines does not matter.

use crate::error::{Result, VerifyError};
use seisarc_core::Category;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Geo-export column naming the producing method.
const METHOD_COLUMN: &str = "MethodIdentifier";
/// Correction column, shared by both parsed exports.
const CORRECTION_COLUMN: &str = "TimeCorrection";
/// Pipeline-export column holding the waveform basename, extension-less.
const FILENAME_COLUMN: &str = "#filename";
/// Method-identifier substring marking detection-algorithm rows.
const ALGORITHM_METHOD: &str = "Algorithm";

struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Read an export, locating the field-names row by `key_column`.
    fn read(path: &Path, key_column: &'static str) -> Result<Table> {
        let text = fs::read_to_string(path)?;
        let mut lines = text.lines();

        let columns = loop {
            let Some(line) = lines.next() else {
                return Err(VerifyError::MissingColumn {
                    path: path.to_path_buf(),
                    column: key_column,
                });
            };
            let fields = split_fields(line);
            if fields.iter().any(|f| f == key_column) {
                break fields;
            }
        };

        let rows = lines
            .filter(|line| !line.trim().is_empty())
            .map(split_fields)
            .collect();
        Ok(Table { columns, rows })
    }

    fn column(&self, name: &'static str, path: &Path) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| VerifyError::MissingColumn {
                path: path.to_path_buf(),
                column: name,
            })
    }
}

fn split_fields(line: &str) -> Vec<String> {
    line.split(',').map(|f| f.trim().to_string()).collect()
}

fn field<'a>(row: &'a [String], idx: usize, path: &Path, row_no: usize) -> Result<&'a str> {
    row.get(idx)
        .map(String::as_str)
        .ok_or_else(|| VerifyError::ShortRow {
            path: path.to_path_buf(),
            row: row_no,
        })
}

fn parse_correction(raw: &str, path: &Path) -> Result<f64> {
    raw.parse().map_err(|_| VerifyError::BadNumber {
        path: path.to_path_buf(),
        value: raw.to_string(),
    })
}

/// Corrections from the geo export's algorithm rows, in row order.
///
/// The export writes one algorithm row per waveform file, in sorted
/// basename order; the verifier pairs them positionally.
pub fn geo_corrections(path: &Path) -> Result<Vec<f64>> {
    let table = Table::read(path, METHOD_COLUMN)?;
    let method = table.column(METHOD_COLUMN, path)?;
    let correction = table.column(CORRECTION_COLUMN, path)?;

    let mut corrections = Vec::new();
    for (i, row) in table.rows.iter().enumerate() {
        if field(row, method, path, i + 1)?.contains(ALGORITHM_METHOD) {
            let raw = field(row, correction, path, i + 1)?;
            corrections.push(parse_correction(raw, path)?);
        }
    }
    Ok(corrections)
}

/// Per-file corrections from the pipeline export, keyed by waveform basename.
///
/// The export stores filenames without the waveform extension; the key has
/// it restored so lookups match enumerated basenames directly.
pub fn pipeline_corrections(path: &Path) -> Result<HashMap<String, f64>> {
    let table = Table::read(path, FILENAME_COLUMN)?;
    let filename = table.column(FILENAME_COLUMN, path)?;
    let correction = table.column(CORRECTION_COLUMN, path)?;

    let mut corrections = HashMap::new();
    for (i, row) in table.rows.iter().enumerate() {
        let stem = field(row, filename, path, i + 1)?;
        let raw = field(row, correction, path, i + 1)?;
        let basename = format!("{stem}{}", Category::Waveform.extension());
        corrections.insert(basename, parse_correction(raw, path)?);
    }
    Ok(corrections)
}
