//! Station-by-station verification orchestration
//!
//! Works against the mirrors so the newest metadata checks every current
//! file; snapshots are never read or touched. Per-file mismatches are
//! recorded and the run continues; precondition failures abort.

use crate::compare::corrections_match;
use crate::error::{Result, VerifyError};
use crate::metadata;
use crate::record::{scan_flags, RecordIter};
use crate::report::{RunReport, StationReport};
use seisarc_core::{layout, Category, Roots, StationCode};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// The verification pipeline over a set of roots.
pub struct Verifier {
    roots: Roots,
}

impl Verifier {
    /// A verifier over the configured roots.
    pub fn new(roots: Roots) -> Self {
        Verifier { roots }
    }

    /// Verify every mirrored station, in order.
    pub fn run(&self) -> Result<RunReport> {
        let mut report = RunReport::new();
        for code in mirrored_stations(&self.roots.mirror_root)? {
            info!(station = %code, "verifying station");
            report.push(self.verify_station(&code)?);
        }
        Ok(report)
    }

    /// Verify one station's mirror against its metadata exports.
    pub fn verify_station(&self, code: &StationCode) -> Result<StationReport> {
        let mirror = self.roots.mirror_dir(code);
        let meta_dir = mirror.join(layout::META_DIR);

        let files = waveform_files(&mirror.join(Category::Waveform.dir_name()))?;

        let geo_path = require_export(&meta_dir, layout::GEO_EXPORT)?;
        let geo = metadata::geo_corrections(&geo_path)?;
        let pipeline_path = require_export(&meta_dir, layout::PIPELINE_EXPORT)?;
        let pipeline = metadata::pipeline_corrections(&pipeline_path)?;

        // Row counts must match the file set before any file is compared.
        if geo.len() != files.len() {
            return Err(VerifyError::GeoRowCount {
                path: geo_path,
                rows: geo.len(),
                files: files.len(),
            });
        }
        if pipeline.len() != files.len() {
            return Err(VerifyError::PipelineRowCount {
                path: pipeline_path,
                rows: pipeline.len(),
                files: files.len(),
            });
        }

        let mut report = StationReport::new(code.as_str());
        for (i, path) in files.iter().enumerate() {
            let Some(name) = layout::basename(path) else {
                continue;
            };
            let pipeline_correction = *pipeline
                .get(name)
                .ok_or_else(|| VerifyError::MissingCorrection(name.to_string()))?;

            if self.verify_file(path, geo[i], pipeline_correction)? {
                debug!(file = name, "corrections agree");
                report.record_pass();
            } else {
                warn!(station = %code, file = name, "correction mismatch");
                report.record_failure(name);
            }
        }

        info!(
            station = %code,
            tested = report.tested,
            passed = report.passed,
            failed = report.failed,
            "station verified"
        );
        Ok(report)
    }

    /// Check one file; `Ok(false)` is a recorded failure, not an error.
    fn verify_file(&self, path: &Path, geo: f64, pipeline: f64) -> Result<bool> {
        let data = fs::read(path)?;
        let record_err = |source| VerifyError::Record {
            path: path.to_path_buf(),
            source,
        };

        let flags = scan_flags(&data).map_err(record_err)?;
        if !flags.all_corrected() {
            debug!(
                path = %path.display(),
                records = flags.record_count,
                corrected = flags.corrected_count,
                "not every record corrected"
            );
            return Ok(false);
        }

        for record in RecordIter::new(&data) {
            let record = record.map_err(record_err)?;
            if !corrections_match(record.correction_seconds(), geo, pipeline) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Stations with a mirror under the mirror root, sorted by code.
fn mirrored_stations(mirror_root: &Path) -> Result<Vec<StationCode>> {
    let mut codes = Vec::new();
    for entry in fs::read_dir(mirror_root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() || !entry.path().join(layout::MIRROR_DIR).is_dir() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        match StationCode::from_canonical(name) {
            Ok(code) => codes.push(code),
            Err(err) => debug!(dir = name, %err, "skipping non-station directory"),
        }
    }
    codes.sort();
    Ok(codes)
}

/// Waveform files in one mirror directory, sorted by basename.
fn waveform_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if let Some(name) = entry.file_name().to_str() {
            if Category::Waveform.matches(name) {
                files.push(entry.path());
            }
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn require_export(meta_dir: &Path, name: &str) -> Result<PathBuf> {
    let path = meta_dir.join(name);
    if path.is_file() {
        Ok(path)
    } else {
        Err(VerifyError::MissingExport(path))
    }
}
