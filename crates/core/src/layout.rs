//! On-disk layout shared by the archiver and the verifier
//!
//! Mirror:   `<mirror_root>/<code>/all/{waveform,secondary,meta}/`
//! Snapshot: `<archive_root>/<code>/archive/<code>:<created>/{waveform,secondary,meta}/`
//!
//! Basenames are the sole identity key for change detection; a file whose
//! content changes without a rename is treated as unchanged.

use serde::Serialize;
use std::path::Path;

/// Marker carried by every automated-detection basename.
pub const DETECTION_MARKER: &str = "DET";

/// Marker for preliminary (partial) files, excluded from all copying.
pub const PRELIMINARY_MARKER: &str = "prelim";

/// Station subdirectory holding the fully-rebuilt current mirror.
pub const MIRROR_DIR: &str = "all";

/// Station subdirectory holding dated snapshots.
pub const ARCHIVE_DIR: &str = "archive";

/// Metadata subdirectory, inside both the mirror and each snapshot.
pub const META_DIR: &str = "meta";

/// Timing-and-location export; carries the `#created:` stamp that keys snapshots.
pub const GEO_EXPORT: &str = "geo_DET.csv";

/// Waveform-to-secondary conversion export; archived verbatim, never parsed.
pub const CONVERSION_EXPORT: &str = "mseed2sac_metadata_DET.csv";

/// Processing-tool export; one row of timing metadata per waveform file.
pub const PIPELINE_EXPORT: &str = "pipeline_metadata_DET.csv";

/// The three exports every station source directory must provide.
pub const METADATA_EXPORTS: [&str; 3] = [GEO_EXPORT, CONVERSION_EXPORT, PIPELINE_EXPORT];

/// The two archived data-file categories.
///
/// Waveform files are the binary record sequences the verifier walks;
/// secondary files are the textual rendition of the same data. Both are
/// mirrored, diffed and snapshotted independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Binary waveform records (`.mseed`)
    Waveform,
    /// Secondary textual form (`.sac`)
    Secondary,
}

impl Category {
    /// Both categories, in the order they are processed.
    pub const ALL: [Category; 2] = [Category::Waveform, Category::Secondary];

    /// Subdirectory name within a mirror or snapshot.
    pub fn dir_name(self) -> &'static str {
        match self {
            Category::Waveform => "waveform",
            Category::Secondary => "secondary",
        }
    }

    /// File extension, including the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Category::Waveform => ".mseed",
            Category::Secondary => ".sac",
        }
    }

    /// Deletion-manifest file name at the snapshot root.
    pub fn manifest_name(self) -> &'static str {
        match self {
            Category::Waveform => "deleted_waveform.txt",
            Category::Secondary => "deleted_secondary.txt",
        }
    }

    /// Whether a basename is an archivable detection file of this category.
    pub fn matches(self, name: &str) -> bool {
        name.contains(DETECTION_MARKER)
            && name.ends_with(self.extension())
            && !is_preliminary(name)
    }
}

/// Whether a basename is marked preliminary.
pub fn is_preliminary(name: &str) -> bool {
    name.contains(PRELIMINARY_MARKER)
}

/// UTF-8 basename of a path, if it has one.
pub fn basename(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}
