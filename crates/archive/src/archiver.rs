//! Station-by-station archival orchestration
//!
//! One station is fully processed before the next begins; a fatal error
//! halts the run with no partial snapshot committed for that station.

use crate::changeset::{ChangeSet, StationChanges};
use crate::error::Result;
use crate::mirror::{Mirror, MirrorBuilder};
use crate::scan::{self, StationSource};
use crate::snapshot::{self, SnapshotKey, SnapshotWriter};
use seisarc_core::{layout, Category, Roots, StationCode};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Result of archiving one station.
#[derive(Debug)]
pub struct StationOutcome {
    /// The station that was archived.
    pub code: StationCode,
    /// The snapshot directory written (or revisited) this run.
    pub snapshot_dir: PathBuf,
    /// What changed since the previous snapshot.
    pub changes: StationChanges,
}

/// The archival pipeline over a set of roots.
pub struct Archiver {
    roots: Roots,
}

impl Archiver {
    /// An archiver over the configured roots.
    pub fn new(roots: Roots) -> Self {
        Archiver { roots }
    }

    /// Archive every station discovered under the source root, in order.
    pub fn run(&self) -> Result<Vec<StationOutcome>> {
        let stations = scan::discover_stations(&self.roots.source_root)?;
        info!(stations = stations.len(), "starting archival run");
        stations
            .iter()
            .map(|station| self.archive_station(station))
            .collect()
    }

    /// Mirror, diff and snapshot one station.
    pub fn archive_station(&self, station: &StationSource) -> Result<StationOutcome> {
        let mirror = MirrorBuilder::new(&self.roots).rebuild(station)?;

        let archive_dir = self.roots.archive_dir(&station.code);
        fs::create_dir_all(&archive_dir)?;

        let changes = StationChanges {
            waveform: self.category_changes(&mirror, &archive_dir, Category::Waveform)?,
            secondary: self.category_changes(&mirror, &archive_dir, Category::Secondary)?,
        };

        let key = SnapshotKey::derive(&station.code, &mirror.meta_dir().join(layout::GEO_EXPORT))?;
        let snapshot_dir = SnapshotWriter::new(archive_dir).write(&key, &mirror, &changes)?;

        info!(
            station = %station.code,
            snapshot = %key.dir_name(),
            new_waveforms = changes.waveform.new.len(),
            deleted_waveforms = changes.waveform.deleted.len(),
            "archived station"
        );
        Ok(StationOutcome {
            code: station.code.clone(),
            snapshot_dir,
            changes,
        })
    }

    fn category_changes(
        &self,
        mirror: &Mirror,
        archive_dir: &Path,
        category: Category,
    ) -> Result<ChangeSet> {
        let current = mirror.basenames(category)?;
        let archived = snapshot::archived_basenames(archive_dir, category)?;
        Ok(ChangeSet::compute(&current, &archived))
    }
}
