//! Archival error taxonomy
//!
//! Everything here is a precondition failure: it aborts the station being
//! archived before its snapshot is committed.

use seisarc_core::StationNameError;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal archival errors.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// A required metadata export is absent from the source directory.
    #[error("required metadata export missing: {0}")]
    MissingExport(PathBuf),

    /// The geo export has no `created:` stamp to key the snapshot with.
    #[error("no 'created:' line in {0}")]
    NoCreatedLine(PathBuf),

    /// A processing-directory name could not be normalized.
    #[error(transparent)]
    Station(#[from] StationNameError),

    /// Directory traversal failed.
    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    /// Underlying filesystem failure.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Archival result alias.
pub type Result<T> = std::result::Result<T, ArchiveError>;
