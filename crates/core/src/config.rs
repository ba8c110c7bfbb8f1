//! Root directories the pipelines operate on
//!
//! An explicit configuration value passed into each component at
//! construction, instead of process-global path lookups. The three roots
//! may coincide; by convention mirrors and snapshots share one data root.

use crate::layout::{ARCHIVE_DIR, MIRROR_DIR};
use crate::station::StationCode;
use std::path::{Path, PathBuf};

/// The recognized filesystem roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roots {
    /// Live processing tree; scanned read-only.
    pub source_root: PathBuf,
    /// Holds each station's fully-rebuilt `all/` mirror.
    pub mirror_root: PathBuf,
    /// Holds each station's dated `archive/` snapshots.
    pub archive_root: PathBuf,
}

impl Roots {
    /// Roots with independent locations.
    pub fn new(source_root: PathBuf, mirror_root: PathBuf, archive_root: PathBuf) -> Self {
        Roots {
            source_root,
            mirror_root,
            archive_root,
        }
    }

    /// Conventional layout under one base directory: the live tree under
    /// `processed/`, mirrors and snapshots together under `data/`.
    pub fn from_base(base: &Path) -> Self {
        Roots {
            source_root: base.join("processed"),
            mirror_root: base.join("data"),
            archive_root: base.join("data"),
        }
    }

    /// A station's mirror directory, `<mirror_root>/<code>/all`.
    pub fn mirror_dir(&self, code: &StationCode) -> PathBuf {
        self.mirror_root.join(code.as_str()).join(MIRROR_DIR)
    }

    /// A station's snapshot container, `<archive_root>/<code>/archive`.
    pub fn archive_dir(&self, code: &StationCode) -> PathBuf {
        self.archive_root.join(code.as_str()).join(ARCHIVE_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_base_layout() {
        let roots = Roots::from_base(Path::new("/srv/seis"));
        assert_eq!(roots.source_root, Path::new("/srv/seis/processed"));
        assert_eq!(roots.mirror_root, Path::new("/srv/seis/data"));
        assert_eq!(roots.archive_root, Path::new("/srv/seis/data"));
    }

    #[test]
    fn station_directories() {
        let roots = Roots::from_base(Path::new("/srv/seis"));
        let code = StationCode::from_canonical("P0008").unwrap();
        assert_eq!(
            roots.mirror_dir(&code),
            Path::new("/srv/seis/data/P0008/all")
        );
        assert_eq!(
            roots.archive_dir(&code),
            Path::new("/srv/seis/data/P0008/archive")
        );
    }
}
