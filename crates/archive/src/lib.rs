//! Incremental archival pipeline
//!
//! Per station: scan the live processing tree, destructively rebuild the
//! current mirror, diff its basenames against every prior snapshot, then
//! freeze a dated snapshot holding only the new files plus full metadata
//! copies and deletion manifests.
//!
//! - `scan`: station discovery and source-tree enumeration
//! - `mirror`: wholesale rebuild of the per-station mirror
//! - `changeset`: new/deleted basename computation
//! - `snapshot`: snapshot keying and materialization
//! - `archiver`: station-by-station orchestration

pub mod archiver;
pub mod changeset;
pub mod error;
pub mod mirror;
pub mod scan;
pub mod snapshot;

pub use archiver::{Archiver, StationOutcome};
pub use changeset::{ChangeSet, StationChanges};
pub use error::{ArchiveError, Result};
pub use mirror::{Mirror, MirrorBuilder};
pub use scan::StationSource;
pub use snapshot::{SnapshotKey, SnapshotWriter};
