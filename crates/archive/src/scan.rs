//! Source-tree scanning
//!
//! The live processing tree nests waveform files arbitrarily deep, and the
//! same basename can appear under more than one subfolder. Scanning returns
//! full paths; the mirror flattens them by basename.

use crate::error::{ArchiveError, Result};
use seisarc_core::{layout, Category, StationCode};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One station's live processing directory.
#[derive(Debug, Clone)]
pub struct StationSource {
    /// Canonical station code derived from the directory name.
    pub code: StationCode,
    /// The processing directory itself.
    pub dir: PathBuf,
}

/// Discover stations under the source root.
///
/// Every subdirectory whose name parses as a raw station name becomes a
/// station; anything else is skipped. Returned sorted by code so batch
/// runs are deterministic.
pub fn discover_stations(source_root: &Path) -> Result<Vec<StationSource>> {
    let mut stations = Vec::new();
    for entry in std::fs::read_dir(source_root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        match StationCode::from_raw_dir_name(name) {
            Ok(code) => stations.push(StationSource {
                code,
                dir: entry.path(),
            }),
            Err(err) => tracing::debug!(dir = name, %err, "skipping non-station directory"),
        }
    }
    stations.sort_by(|a, b| a.code.cmp(&b.code));
    Ok(stations)
}

/// Recursively enumerate one category's detection files, preliminary
/// excluded. Sorted by basename.
pub fn scan_category(dir: &Path, category: Category) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if category.matches(name) {
                files.push(entry.into_path());
            }
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Paths of the three required metadata exports inside `dir`.
///
/// The first missing export is fatal.
pub fn export_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    layout::METADATA_EXPORTS
        .iter()
        .map(|name| {
            let path = dir.join(name);
            if path.is_file() {
                Ok(path)
            } else {
                Err(ArchiveError::MissingExport(path))
            }
        })
        .collect()
}
