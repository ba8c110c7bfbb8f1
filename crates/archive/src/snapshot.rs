//! Snapshot keying and materialization
//!
//! A snapshot's identity comes from the source data itself: the `created:`
//! stamp inside the geo export, not the wall clock at archival time.
//! Re-running against unchanged source data therefore lands on the same
//! snapshot directory instead of minting a new one.

use crate::changeset::StationChanges;
use crate::error::{ArchiveError, Result};
use crate::mirror::Mirror;
use seisarc_core::{layout, Category, StationCode};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Marker line prefix inside the geo export.
const CREATED_MARKER: &str = "created:";

/// Composite snapshot identity: station code plus source-reported creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotKey {
    code: StationCode,
    created: String,
}

impl SnapshotKey {
    /// Derive the key from the geo export's `created:` line.
    ///
    /// The first line containing the marker wins; its remainder, trimmed,
    /// is the timestamp. A geo export without one is fatal.
    pub fn derive(code: &StationCode, geo_export: &Path) -> Result<SnapshotKey> {
        let text = fs::read_to_string(geo_export)?;
        for line in text.lines() {
            if let Some(idx) = line.find(CREATED_MARKER) {
                let created = line[idx + CREATED_MARKER.len()..].trim();
                if created.is_empty() {
                    break;
                }
                return Ok(SnapshotKey {
                    code: code.clone(),
                    created: created.to_string(),
                });
            }
        }
        Err(ArchiveError::NoCreatedLine(geo_export.to_path_buf()))
    }

    /// The source-reported creation timestamp.
    pub fn created(&self) -> &str {
        &self.created
    }

    /// Snapshot directory name, `<code>:<created>`.
    pub fn dir_name(&self) -> String {
        format!("{}:{}", self.code, self.created)
    }
}

/// Union of basenames across all existing snapshots for one category.
///
/// An absent archive directory is the bootstrap case: nothing archived yet.
pub fn archived_basenames(archive_dir: &Path, category: Category) -> Result<BTreeSet<String>> {
    let mut names = BTreeSet::new();
    if !archive_dir.exists() {
        return Ok(names);
    }
    for entry in fs::read_dir(archive_dir)? {
        let category_dir = entry?.path().join(category.dir_name());
        if !category_dir.is_dir() {
            continue;
        }
        for file in fs::read_dir(category_dir)? {
            let file = file?;
            if let Some(name) = file.file_name().to_str() {
                if category.matches(name) {
                    names.insert(name.to_string());
                }
            }
        }
    }
    Ok(names)
}

/// Materializes dated snapshots under one station's archive directory.
pub struct SnapshotWriter {
    archive_dir: PathBuf,
}

impl SnapshotWriter {
    /// A writer rooted at `<archive_root>/<code>/archive`.
    pub fn new(archive_dir: PathBuf) -> Self {
        SnapshotWriter { archive_dir }
    }

    /// Write (or revisit) the snapshot for `key`.
    ///
    /// Directories are created if absent and never truncated, so a re-run
    /// against unchanged source data revisits the existing snapshot without
    /// error. New files are copied FROM THE MIRROR: source-tree paths are
    /// not basename-unique across nested subfolders, the mirror is.
    ///
    /// Both deletion manifests are always written, possibly empty, so
    /// downstream tooling can rely on their existence.
    pub fn write(
        &self,
        key: &SnapshotKey,
        mirror: &Mirror,
        changes: &StationChanges,
    ) -> Result<PathBuf> {
        let snapshot_dir = self.archive_dir.join(key.dir_name());

        for category in Category::ALL {
            let dest = snapshot_dir.join(category.dir_name());
            fs::create_dir_all(&dest)?;
            let src = mirror.category_dir(category);
            for name in &changes.get(category).new {
                fs::copy(src.join(name), dest.join(name))?;
                debug!(file = name.as_str(), "archived new file");
            }
        }

        // Full metadata copies every time, key-prefixed so snapshots merged
        // into one pool cannot collide.
        let meta_dest = snapshot_dir.join(layout::META_DIR);
        fs::create_dir_all(&meta_dest)?;
        for entry in fs::read_dir(mirror.meta_dir())? {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                let renamed = format!("{}-{}", key.dir_name(), name);
                fs::copy(entry.path(), meta_dest.join(renamed))?;
            }
        }

        for category in Category::ALL {
            let mut body = changes.get(category).deleted.join("\n");
            if !body.is_empty() {
                body.push('\n');
            }
            fs::write(snapshot_dir.join(category.manifest_name()), body)?;
        }

        Ok(snapshot_dir)
    }
}
