//! Versioned archival and timing verification for station waveform data.
//!
//! This facade re-exports the public surface of the internal crates.

// ============================================================================
// Archival pipeline
// ============================================================================

pub use seisarc_archive::{
    ArchiveError, Archiver, ChangeSet, Mirror, MirrorBuilder, SnapshotKey, SnapshotWriter,
    StationChanges, StationOutcome, StationSource,
};

// ============================================================================
// Verification pipeline
// ============================================================================

pub use seisarc_verify::{
    corrections_match, RunReport, StationReport, Verifier, VerifyError, CORRECTION_TOLERANCE,
};

// ============================================================================
// Shared core types
// ============================================================================

pub use seisarc_core::{Category, Roots, StationCode, StationNameError};
